use crate::ReadingArgs;

pub fn run(
    mode: &str,
    values: &[String],
    seed: Option<u64>,
    reading: &ReadingArgs,
) -> Result<(), String> {
    let when = super::parse_when(reading.at.as_deref())?;
    let request = super::cast_request(mode, values, seed, Some(when))?;
    let service = super::service(reading.pillars.as_deref())?;
    let report = service
        .cast_and_analyze(&request, &reading.question, when)
        .map_err(|e| e.to_string())?;
    super::print(&report, reading.json)
}
