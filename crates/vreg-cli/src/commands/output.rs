//! Rendering extraction results as JSON, CSV or a text report.

use vreg_core::{ExtractionResult, FieldName, RegistrationSummary};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON record
    Json,
    /// CSV with one column per field
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(result.to_json()?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["success"];
    header.extend(FieldName::ALL.iter().map(|f| f.as_str()));
    header.push("error");
    wtr.write_record(&header)?;

    let mut row = vec![result.success.to_string()];
    row.extend(
        FieldName::ALL
            .iter()
            .map(|f| result.get(*f).map(|v| v.to_string()).unwrap_or_default()),
    );
    row.push(result.error.clone().unwrap_or_default());
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    if !result.success {
        output.push_str(&format!(
            "Extraction failed: {}\n",
            result.error.as_deref().unwrap_or("unknown error")
        ));
        return output;
    }

    let summary = RegistrationSummary::from_fields(&result.fields);
    let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    output.push_str(&format!("Lines read: {}\n\n", result.line_count));

    output.push_str("Vehicle:\n");
    let vehicle = &summary.vehicle;
    output.push_str(&format!("  Plate:          {}\n", show(vehicle.plate.clone())));
    output.push_str(&format!("  VIN:            {}\n", show(vehicle.vin.clone())));
    output.push_str(&format!("  Model:          {}\n", show(vehicle.model.clone())));
    output.push_str(&format!(
        "  Fuel:           {}\n",
        show(vehicle.fuel.map(|f| format!("{} ({})", f.korean_label(), f)))
    ));
    output.push_str(&format!(
        "  First reg.:     {}\n",
        show(vehicle.first_registered_at.map(|d| d.to_string()))
    ));
    output.push_str(&format!(
        "  Manufactured:   {}\n",
        show(vehicle.manufacturing_date.map(|d| d.to_string()))
    ));
    output.push_str(&format!(
        "  Mileage:        {}\n",
        show(vehicle.mileage_km.map(|n| format!("{} km", n)))
    ));
    output.push_str(&format!(
        "  Gross weight:   {}\n",
        show(vehicle.weight_kg.map(|n| format!("{} kg", n)))
    ));
    output.push_str(&format!(
        "  Displacement:   {}\n",
        show(vehicle.displacement_cc.map(|n| format!("{} cc", n)))
    ));
    output.push_str(&format!("  Engine:         {}\n", show(vehicle.engine_number.clone())));
    output.push_str(&format!("  Color:          {}\n", show(vehicle.color.clone())));
    output.push('\n');

    output.push_str("Owner:\n");
    let owner = &summary.owner;
    output.push_str(&format!("  Name:           {}\n", show(owner.name.clone())));
    output.push_str(&format!("  Address:        {}\n", show(owner.address.clone())));
    output.push_str(&format!(
        "  Birth date:     {}\n",
        show(owner.birth_date.map(|d| d.to_string()))
    ));

    if !result.warnings.is_empty() {
        output.push_str("\nSkipped:\n");
        for warning in &result.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use vreg_core::ExtractionPipeline;

    #[test]
    fn test_csv_has_one_column_per_field() {
        let result = ExtractionPipeline::new().extract_text("12가3456\n총 15,000km");
        let csv = format_result(&result, OutputFormat::Csv).unwrap();
        let mut rows = csv.lines();

        let header: Vec<_> = rows.next().unwrap().split(',').collect();
        assert_eq!(header.len(), FieldName::ALL.len() + 2);
        assert_eq!(header[1], "license_plate");

        let row: Vec<_> = rows.next().unwrap().split(',').collect();
        assert_eq!(row[0], "true");
        assert_eq!(row[1], "12가3456");
        assert!(row.contains(&"15000"));
    }

    #[test]
    fn test_text_report() {
        let result = ExtractionPipeline::new().extract_text("소유자: 홍길동\n연료 경유");
        let text = format_result(&result, OutputFormat::Text).unwrap();
        assert!(text.contains("Lines read: 2"));
        assert!(text.contains("홍길동"));
        assert!(text.contains("경유 (diesel)"));
    }
}
