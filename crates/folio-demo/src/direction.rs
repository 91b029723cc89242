use std::io::Write;

use clap::Args;
use folio_core::{PointerEvent, Rect, detect_direction};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct DirectionArgs {
    /// Element box as `left,top,width,height` in viewport px.
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    pub rect: Rect,

    /// Pointer position as `x,y` in viewport px.
    #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
    pub pointer: PointerEvent,

    /// Print a JSON object instead of the bare direction.
    #[arg(long)]
    pub json: bool,
}

fn parse_numbers<const N: usize>(text: &str) -> std::result::Result<[f64; N], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got {text:?}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("not a finite number: {part:?}"))?;
    }
    Ok(out)
}

pub fn parse_rect(text: &str) -> std::result::Result<Rect, String> {
    let [left, top, width, height] = parse_numbers::<4>(text)?;
    Ok(Rect::new(left, top, width, height))
}

pub fn parse_pointer(text: &str) -> std::result::Result<PointerEvent, String> {
    let [x, y] = parse_numbers::<2>(text)?;
    Ok(PointerEvent::new(x, y))
}

pub fn run_direction(args: &DirectionArgs, out: &mut dyn Write) -> Result<()> {
    let direction = detect_direction(args.pointer, args.rect);
    tracing::debug!(
        direction = direction.as_str(),
        degenerate = args.rect.is_degenerate(),
        "classified"
    );
    if args.json {
        let value = serde_json::json!({
            "direction": direction,
            "rect": args.rect,
            "pointer": args.pointer,
        });
        writeln!(out, "{value}")?;
    } else {
        writeln!(out, "{direction}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rect: &str, pointer: &str, json: bool) -> String {
        let args = DirectionArgs {
            rect: parse_rect(rect).unwrap(),
            pointer: parse_pointer(pointer).unwrap(),
            json,
        };
        let mut out = Vec::new();
        run_direction(&args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_lists() {
        assert_eq!(
            parse_rect("10, 20,300,-4").unwrap(),
            Rect::new(10.0, 20.0, 300.0, -4.0)
        );
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_pointer("1,nan").is_err());
        assert!(parse_pointer("a,b").is_err());
    }

    #[test]
    fn prints_direction() {
        assert_eq!(run("0,0,400,200", "200,1", false), "top\n");
        assert_eq!(run("0,0,400,200", "399,100", false), "right\n");
        // Degenerate boxes classify as left.
        assert_eq!(run("0,0,0,200", "5,5", false), "left\n");
    }

    #[test]
    fn prints_json() {
        let line = run("0,0,400,200", "200,199", true);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["direction"], "bottom");
        assert_eq!(value["pointer"]["client_y"], 199.0);
    }
}
