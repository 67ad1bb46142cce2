use yao_engine::cast::parse_tally;

use crate::ReadingArgs;

pub fn run(lines: &str, reading: &ReadingArgs) -> Result<(), String> {
    let lines = parse_tally(lines).map_err(|e| e.to_string())?;
    let when = super::parse_when(reading.at.as_deref())?;
    let service = super::service(reading.pillars.as_deref())?;
    let report = service
        .full_analysis(&lines, &reading.question, when)
        .map_err(|e| e.to_string())?;
    super::print(&report, reading.json)
}
