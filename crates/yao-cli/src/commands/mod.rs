pub mod analyze;
pub mod cast;
pub mod divine;
pub mod request;

use chrono::NaiveDateTime;
use yao_core::SexagenaryTime;
use yao_engine::{
    AnalysisConfig, Calendar, CastRequest, CoinThrow, FixedCalendar, LiuYaoService, Report,
    SolarTermCalendar,
};

type Service = LiuYaoService<Box<dyn Calendar>>;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse `--at`, or take the local time.
fn parse_when(at: Option<&str>) -> Result<NaiveDateTime, String> {
    let Some(text) = at else {
        return Ok(chrono::Local::now().naive_local());
    };
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| format!("cannot read '{text}' as a timestamp (try 2024-03-15T09:30)"))
}

/// Build the service: fixed pillars when given, the built-in calendar otherwise.
fn service(pillars: Option<&str>) -> Result<Service, String> {
    let calendar: Box<dyn Calendar> = match pillars {
        Some(text) => {
            let time: SexagenaryTime = text
                .parse()
                .map_err(|e| format!("invalid pillars '{text}': {e}"))?;
            Box::new(FixedCalendar::new(time))
        }
        None => Box::new(SolarTermCalendar),
    };
    LiuYaoService::new(calendar, AnalysisConfig::default()).map_err(|e| e.to_string())
}

/// Print a report as JSON or as tables.
fn print(report: &Report, json: bool) -> Result<(), String> {
    if json {
        let body = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
        println!("{body}");
    } else {
        crate::render::print_report(report);
    }
    Ok(())
}

/// Read one coin throw: a backs count (0-3) or three faces such as `HTT`.
fn parse_throw(text: &str) -> Result<CoinThrow, String> {
    if let Ok(backs) = text.parse::<u8>() {
        return Ok(CoinThrow::Backs(backs));
    }
    let faces: Vec<char> = text.to_uppercase().chars().collect();
    if faces.len() != 3 || faces.iter().any(|c| *c != 'H' && *c != 'T') {
        return Err(format!("'{text}' is neither 0-3 nor three of H/T"));
    }
    Ok(CoinThrow::Backs(faces.iter().filter(|c| **c == 'T').count() as u8))
}

/// Turn a mode name and positional values into a cast request.
fn cast_request(
    mode: &str,
    values: &[String],
    seed: Option<u64>,
    at: Option<NaiveDateTime>,
) -> Result<CastRequest, String> {
    match mode.to_lowercase().as_str() {
        "coin" | "coins" => {
            let coin_throws = values
                .iter()
                .map(|v| parse_throw(v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CastRequest::Coin { coin_throws })
        }
        "number" | "numbers" => match values {
            [a, b] => {
                let n1 = a.parse().map_err(|_| format!("'{a}' is not a positive number"))?;
                let n2 = b.parse().map_err(|_| format!("'{b}' is not a positive number"))?;
                Ok(CastRequest::Number {
                    number_pair: (n1, n2),
                })
            }
            _ => Err(format!("number mode needs two values, got {}", values.len())),
        },
        "time" => Ok(CastRequest::Time { timestamp: at }),
        "random" => Ok(CastRequest::Random {
            seed: seed.unwrap_or_else(|| chrono::Local::now().timestamp_micros().unsigned_abs()),
        }),
        other => Err(format!(
            "unknown mode '{other}' (expected coin, number, time, random)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_in_several_shapes() {
        let a = parse_when(Some("2024-03-15T09:30")).unwrap();
        let b = parse_when(Some("2024-03-15 09:30:00")).unwrap();
        assert_eq!(a, b);
        assert!(parse_when(Some("yesterday")).is_err());
    }

    #[test]
    fn throws_from_digits_or_faces() {
        assert_eq!(parse_throw("2").unwrap(), CoinThrow::Backs(2));
        assert_eq!(parse_throw("htt").unwrap(), CoinThrow::Backs(2));
        assert!(parse_throw("HTX").is_err());
    }

    #[test]
    fn requests_by_mode() {
        let values = vec!["7".to_string(), "8".to_string()];
        assert_eq!(
            cast_request("number", &values, None, None).unwrap(),
            CastRequest::Number { number_pair: (7, 8) }
        );
        assert_eq!(
            cast_request("random", &[], Some(3), None).unwrap(),
            CastRequest::Random { seed: 3 }
        );
        assert!(cast_request("number", &values[..1], None, None).is_err());
        assert!(cast_request("tarot", &[], None, None).is_err());
    }
}
