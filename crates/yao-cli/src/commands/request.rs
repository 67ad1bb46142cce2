use std::path::Path;

use yao_engine::FacadeInput;

pub fn run(file: &Path, pillars: Option<&str>) -> Result<(), String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let service = super::service(pillars)?;
    tracing::debug!(file = %file.display(), "serving request");

    match FacadeInput::from_json(&text).and_then(|input| service.handle(&input)) {
        Ok(report) => super::print(&report, true),
        Err(e) => {
            if e.is_fatal() {
                tracing::error!(kind = e.kind(), "engine tables are inconsistent");
            }
            let body = serde_json::to_string_pretty(&e.to_report()).map_err(|e| e.to_string())?;
            println!("{body}");
            Err(e.to_string())
        }
    }
}
