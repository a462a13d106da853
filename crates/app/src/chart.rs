use plotters::{
    element::Pie,
    prelude::{IntoDrawingArea, SVGBackend},
    style::{BLACK, Color, IntoFont, Palette, Palette99, RGBColor, WHITE},
};
use realty_domain::StatusCounts;

pub const TITLE: &str = "Flats Availability";

const SIZE: (u32, u32) = (640, 480);
const FONT: &str = "sans-serif";
const START_ANGLE: f64 = 90.0;

/// Draw a pie chart of the status counts as SVG.
#[allow(clippy::cast_precision_loss)]
pub fn pie(counts: &StatusCounts) -> Result<String, Box<dyn std::error::Error>> {
    let sizes = counts
        .iter()
        .map(|(_, count)| count as f64)
        .collect::<Vec<_>>();
    let colors = (0..counts.len()).map(color).collect::<Vec<_>>();
    let labels = slice_labels(counts);

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, SIZE).into_drawing_area();

        root.fill(&WHITE)?;

        let root = root.titled(TITLE, (FONT, 20).into_font().color(&BLACK))?;
        let (width, height) = root.dim_in_pixel();
        let center = (i32::try_from(width / 2)?, i32::try_from(height / 2)?);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style((FONT, 14).into_font().color(&BLACK.mix(0.8)));
        root.draw(&pie)?;

        root.present()?;
    }

    Ok(result)
}

/// Label of each slice: the status and its share of all flats.
#[must_use]
pub fn slice_labels(counts: &StatusCounts) -> Vec<String> {
    counts
        .iter()
        .map(|(label, count)| format!("{label} ({:.1}%)", counts.percentage(count)))
        .collect()
}

fn color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn counts() -> StatusCounts {
        StatusCounts::new([
            ("Available".to_string(), 2),
            ("Not Available".to_string(), 1),
        ])
    }

    #[test]
    fn test_slice_labels() {
        assert_eq!(
            slice_labels(&counts()),
            ["Available (66.7%)", "Not Available (33.3%)"]
        );
    }

    #[test]
    fn test_slice_labels_single_status() {
        assert_eq!(
            slice_labels(&StatusCounts::new([("Available".to_string(), 3)])),
            ["Available (100.0%)"]
        );
    }

    #[test]
    fn test_pie() {
        let svg = pie(&counts()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(TITLE));
        assert!(svg.contains("Available (66.7%)"));
        assert!(svg.contains("Not Available (33.3%)"));
    }

    #[test]
    fn test_colors_differ() {
        let (a, b) = (color(0), color(1));
        assert_ne!((a.0, a.1, a.2), (b.0, b.1, b.2));
    }
}
