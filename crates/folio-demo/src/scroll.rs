use std::cell::Cell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Args, ValueEnum};
use folio_core::{ScrollMeasure, ScrollOffsets};
use folio_runtime::scenes::{BackgroundScene, SkillsMarquee, TimelineScene};
use folio_runtime::{Measure, MotionConfig, Scene, ScrollDriver};
use folio_style::StyleValue;

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    Skills,
    Timeline,
    Background,
}

#[derive(Debug, Clone, Args)]
pub struct ScrollArgs {
    /// Scene to drive.
    #[arg(long, value_enum)]
    pub scene: SceneKind,

    /// Viewport height in px.
    #[arg(long, default_value_t = 800.0)]
    pub viewport: f64,

    /// Height of the scrolled section in px.
    #[arg(long, default_value_t = 1200.0)]
    pub height: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Timeline node count.
    #[arg(long, default_value_t = 4)]
    pub nodes: usize,

    /// Motion configuration file (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print one JSON object per frame.
    #[arg(long)]
    pub json: bool,
}

/// Element tops for a linear pass from the viewport bottom to fully above it.
#[must_use]
pub fn element_tops(viewport: f64, height: f64, frames: u32) -> Vec<f64> {
    if frames <= 1 {
        return vec![viewport];
    }
    let last = f64::from(frames - 1);
    (0..frames)
        .map(|k| viewport - (viewport + height) * f64::from(k) / last)
        .collect()
}

fn emit(
    out: &mut dyn Write,
    json: bool,
    frame: usize,
    key: &str,
    value: f64,
    scene: &dyn Scene,
) -> Result<()> {
    let channels = scene.channels();
    if json {
        let channels: Vec<_> = channels
            .iter()
            .map(|c| serde_json::json!({ "name": c.name, "css": c.css }))
            .collect();
        let mut line = serde_json::Map::new();
        line.insert("scene".into(), scene.name().into());
        line.insert("frame".into(), frame.into());
        line.insert(key.into(), value.into());
        line.insert("channels".into(), channels.into());
        writeln!(out, "{}", serde_json::Value::Object(line))?;
    } else {
        writeln!(out, "frame {frame} {key} {}", StyleValue::Number(value))?;
        for channel in channels {
            writeln!(out, "  {}: {}", channel.name, channel.css)?;
        }
    }
    Ok(())
}

fn drive<M: Measure>(
    driver: &mut ScrollDriver<M>,
    element: &Cell<ScrollMeasure>,
    tops: &[f64],
    scene: &dyn Scene,
    out: &mut dyn Write,
    json: bool,
) -> Result<()> {
    let progress = driver.progress();
    for (frame, &top) in tops.iter().enumerate() {
        element.set(element.get().with_top(top));
        driver.on_scroll();
        driver.on_frame();
        emit(out, json, frame, "progress", progress.get(), scene)?;
    }
    Ok(())
}

pub fn run_scroll(args: &ScrollArgs, out: &mut dyn Write) -> Result<()> {
    if !(args.viewport.is_finite() && args.viewport > 0.0) {
        return Err(DemoError::invalid(format!(
            "viewport must be a positive number, got {}",
            args.viewport
        )));
    }
    if !(args.height.is_finite() && args.height >= 0.0) {
        return Err(DemoError::invalid(format!(
            "height must be a non-negative number, got {}",
            args.height
        )));
    }
    let config = match &args.config {
        Some(path) => MotionConfig::load(path)?,
        None => MotionConfig::default(),
    };
    let tops = element_tops(args.viewport, args.height, args.frames);
    let element = Rc::new(Cell::new(ScrollMeasure::new(
        args.viewport,
        args.height,
        args.viewport,
    )));
    let source = {
        let element = Rc::clone(&element);
        move || element.get()
    };
    tracing::debug!(scene = ?args.scene, frames = args.frames, "simulating scroll");

    match args.scene {
        SceneKind::Skills => {
            let mut driver =
                config.configure_driver(ScrollDriver::new(source, ScrollOffsets::default()));
            let marquee = SkillsMarquee::new(&driver.progress(), &config.to_marquee_config());
            drive(&mut driver, &element, &tops, &marquee, out, args.json)
        }
        SceneKind::Timeline => {
            let mut driver =
                config.configure_driver(ScrollDriver::new(source, ScrollOffsets::timeline()));
            let timeline = TimelineScene::new(
                &driver.progress(),
                args.nodes,
                args.height,
                &config.to_timeline_config(),
            )?;
            drive(&mut driver, &element, &tops, &timeline, out, args.json)
        }
        SceneKind::Background => {
            let mut scene = BackgroundScene::new(config.to_background_config());
            for (frame, top) in tops.iter().enumerate() {
                let scroll_y = args.viewport - top;
                scene.on_scroll(scroll_y);
                scene.on_frame();
                emit(out, args.json, frame, "scroll_y", scroll_y, &scene)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(scene: SceneKind, frames: u32, json: bool) -> ScrollArgs {
        ScrollArgs {
            scene,
            viewport: 800.0,
            height: 1200.0,
            frames,
            nodes: 2,
            config: None,
            json,
        }
    }

    fn run(args: &ScrollArgs) -> String {
        let mut out = Vec::new();
        run_scroll(args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn tops_span_the_full_pass() {
        assert_eq!(
            element_tops(800.0, 1200.0, 5),
            vec![800.0, 300.0, -200.0, -700.0, -1200.0]
        );
        assert_eq!(element_tops(800.0, 1200.0, 1), vec![800.0]);
    }

    #[test]
    fn skills_frames_list_every_lane() {
        let text = run(&args(SceneKind::Skills, 3, false));
        let frames = text.lines().filter(|l| l.starts_with("frame ")).count();
        assert_eq!(frames, 3);
        assert!(text.starts_with(
            "frame 0 progress 0\n  lane0.transform: translate3d(-225px, 0, 0)\n"
        ));
        assert_eq!(text.lines().filter(|l| l.contains("lane5.transform")).count(), 3);
    }

    #[test]
    fn timeline_json_lines() {
        let text = run(&args(SceneKind::Timeline, 4, true));
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["scene"], "timeline");
        assert_eq!(lines[0]["channels"][0]["name"], "line.height");
        // Two nodes, five channels each, after the line channels.
        assert_eq!(lines[3]["channels"].as_array().map(Vec::len), Some(2 + 2 * 5));
        let last = lines[3]["progress"].as_f64().unwrap();
        assert!(last > 0.0 && last <= 1.0);
    }

    #[test]
    fn background_follows_scroll_offset() {
        let text = run(&args(SceneKind::Background, 5, false));
        assert!(text.contains("frame 4 scroll_y 2000\n"));
        assert!(text.contains("  grid.transform: translate3d(0, 8px, 0)\n"));
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut bad = args(SceneKind::Skills, 2, false);
        bad.viewport = 0.0;
        let mut out = Vec::new();
        let err = run_scroll(&bad, &mut out).unwrap_err();
        assert!(err.to_string().contains("viewport"));
    }

    #[test]
    fn loads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motion.toml");
        std::fs::write(
            &path,
            "[skills]\namplitudes = [100.0]\n\n[smoothing]\nenabled = false\n",
        )
        .unwrap();
        let mut run_args = args(SceneKind::Skills, 2, false);
        run_args.config = Some(path);
        let text = run(&run_args);
        assert_eq!(
            text,
            "frame 0 progress 0\n  lane0.transform: translate3d(-50px, 0, 0)\n  \
             badges.transform: translate3d(0, 0, 0)\n\
             frame 1 progress 1\n  lane0.transform: translate3d(50px, 0, 0)\n  \
             badges.transform: translate3d(0, 0, 0)\n"
        );
    }
}
