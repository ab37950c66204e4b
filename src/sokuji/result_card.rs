#![allow(clippy::cast_possible_truncation)]

use std::io::Cursor;

use anyhow::Context as _;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 300;

const BACKGROUND: RGBColor = RGBColor(44, 62, 80);
const BASELINE: RGBColor = RGBColor(255, 250, 250);
const LINE: RGBColor = RGBColor(100, 149, 237);

/// Renders the cumulative score-differential sparkline attached to a
/// finished mogi, as a PNG.
pub fn render(score_history: &[[i32; 2]]) -> anyhow::Result<Vec<u8>> {
    let mut diffs = Vec::with_capacity(score_history.len() + 1);
    let mut running = 0;
    diffs.push(running);
    for scores in score_history {
        running += scores[0] - scores[1];
        diffs.push(running);
    }
    let min = diffs.iter().copied().min().unwrap_or(0);
    let max = diffs.iter().copied().max().unwrap_or(0);
    let (lo, hi) = if min == max {
        (min - 1, max + 1)
    } else {
        (min, max)
    };
    let last = i32::try_from(diffs.len()).unwrap_or(i32::MAX) - 1;

    let mut buffer = vec![0_u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .build_cartesian_2d(0..last.max(1), lo..hi)?;
        if lo <= 0 && hi >= 0 {
            chart.draw_series(LineSeries::new((0..=last.max(1)).map(|x| (x, 0)), &BASELINE))?;
        }
        chart.draw_series(LineSeries::new(
            diffs.iter().enumerate().map(|(i, &d)| (i as i32, d)),
            LINE.stroke_width(4),
        ))?;
        root.present()?;
    }

    let card = RgbImage::from_raw(WIDTH, HEIGHT, buffer)
        .context("result card buffer has the wrong size")?;
    let mut png = Vec::new();
    card.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png_for_a_full_mogi() {
        let history: Vec<[i32; 2]> = (0..12).map(|i| [41 + i, 41 - i]).collect();
        let png = render(&history).unwrap();
        // PNG signature.
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn flat_and_empty_histories_still_render() {
        assert!(!render(&[]).unwrap().is_empty());
        assert!(!render(&[[41, 41], [41, 41]]).unwrap().is_empty());
    }
}
