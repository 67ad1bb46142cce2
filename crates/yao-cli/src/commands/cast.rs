use yao_engine::cast::format_tally;

pub fn run(
    mode: &str,
    values: &[String],
    seed: Option<u64>,
    at: Option<&str>,
    pillars: Option<&str>,
) -> Result<(), String> {
    let when = super::parse_when(at)?;
    let request = super::cast_request(mode, values, seed, Some(when))?;
    let service = super::service(pillars)?;
    let lines = service.cast_only(&request).map_err(|e| e.to_string())?;

    println!("  {}", format_tally(&lines));
    crate::render::print_lines(&lines);
    Ok(())
}
