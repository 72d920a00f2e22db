use std::fmt::Display;
use std::io::Write;

use anyhow::Context;
use runtime::event_bus::Stamped;
use serde::Serialize;
use tour::TourEvent;

#[derive(Serialize)]
struct EventLine<'a> {
    t: f64,
    #[serde(flatten)]
    event: &'a TourEvent,
}

#[derive(Serialize)]
struct RejectionLine<'a> {
    event: &'static str,
    command: &'a str,
    message: String,
}

pub fn write_events<W: Write>(out: &mut W, events: &[Stamped<TourEvent>]) -> anyhow::Result<()> {
    for stamped in events {
        let line = EventLine {
            t: stamped.at.seconds(),
            event: &stamped.event,
        };
        serde_json::to_writer(&mut *out, &line).context("encoding event")?;
        writeln!(out).context("writing event")?;
    }
    Ok(())
}

/// Reports a command that could not be parsed or was refused.
pub fn write_rejection<W: Write>(out: &mut W, command: &str, err: &dyn Display) -> anyhow::Result<()> {
    let line = RejectionLine {
        event: "command_rejected",
        command: command.trim(),
        message: err.to_string(),
    };
    serde_json::to_writer(&mut *out, &line).context("encoding rejection")?;
    writeln!(out).context("writing rejection")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_events, write_rejection};
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use runtime::event_bus::Stamped;
    use serde_json::{json, Value};
    use tour::{BuildingId, TourError, TourEvent};

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn events_become_json_lines() {
        let events = vec![
            Stamped {
                at: Time(0.0),
                event: TourEvent::SessionEntered {
                    building: BuildingId(1),
                    zone_count: 5,
                    used_fallback: true,
                },
            },
            Stamped {
                at: Time(2.5),
                event: TourEvent::progress(1, 5),
            },
        ];
        let mut buf = Vec::new();
        write_events(&mut buf, &events).unwrap();

        assert_eq!(
            lines(&buf),
            vec![
                json!({"t": 0.0, "event": "session_entered", "building": 1,
                       "zone_count": 5, "used_fallback": true}),
                json!({"t": 2.5, "event": "tour_progress", "index": 1,
                       "total": 5, "fraction": 0.4}),
            ]
        );
    }

    #[test]
    fn rejections_carry_the_message() {
        let mut buf = Vec::new();
        write_rejection(&mut buf, " next ", &TourError::NoSession).unwrap();
        assert_eq!(
            lines(&buf),
            vec![json!({"event": "command_rejected", "command": "next",
                        "message": "no interior session is active"})]
        );
    }
}
