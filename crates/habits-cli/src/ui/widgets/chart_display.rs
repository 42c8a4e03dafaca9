use habits_analysis::chart::{BoxSummary, ChartBody, ChartSpec, Series};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Style, Stylize as _},
    symbols::{Marker, merge::MergeStrategy},
    text::Text,
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use crate::ui::widgets::color;

/// Half the width of a box, in category units.
const BOX_HALF_WIDTH: f64 = 0.25;

/// Draws a bound chart as a terminal scatter plot or box plot.
#[derive(Debug)]
pub struct ChartDisplay<'a> {
    spec: &'a ChartSpec,
}

impl<'a> ChartDisplay<'a> {
    pub fn new(spec: &'a ChartSpec) -> Self {
        Self { spec }
    }

    fn block(&self) -> Block<'a> {
        Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title(self.spec.title.as_str())
    }
}

impl Widget for ChartDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Some(y_bounds) = self.spec.y_bounds().map(padded) else {
            let block = self.block();
            let inner = block.inner(area).centered_vertically(Constraint::Length(1));
            Widget::render(block, area, buf);
            Widget::render(Text::from("Sin datos").centered().fg(color::MUTED), inner, buf);
            return;
        };
        match &self.spec.body {
            ChartBody::Scatter { series } => {
                let x_bounds = self.spec.x_bounds().map_or([0.0, 1.0], padded);
                self.render_scatter(series, x_bounds, y_bounds, area, buf);
            }
            ChartBody::Box { groups } => self.render_boxes(groups, y_bounds, area, buf),
        }
    }
}

impl ChartDisplay<'_> {
    fn render_scatter(
        &self,
        series: &[Series],
        x_bounds: [f64; 2],
        y_bounds: [f64; 2],
        area: Rect,
        buf: &mut Buffer,
    ) {
        let datasets = series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let dataset = Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(color::series(i)))
                    .data(&s.points);
                match &s.label {
                    Some(label) => dataset.name(label.as_str()),
                    None => dataset,
                }
            })
            .collect::<Vec<_>>();

        let chart = Chart::new(datasets)
            .block(self.block())
            .x_axis(numeric_axis(&self.spec.x_label, x_bounds))
            .y_axis(numeric_axis(&self.spec.y_label, y_bounds))
            .legend_position(Some(LegendPosition::BottomRight))
            .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)));
        Widget::render(chart, area, buf);
    }

    #[expect(clippy::cast_precision_loss)]
    fn render_boxes(
        &self,
        groups: &[BoxSummary],
        y_bounds: [f64; 2],
        area: Rect,
        buf: &mut Buffer,
    ) {
        // Category i is centered at x = i + 1; the extra slots keep boxes off the axes
        let shapes = groups
            .iter()
            .enumerate()
            .map(|(i, group)| BoxShape::new(i as f64 + 1.0, group))
            .collect::<Vec<_>>();

        let mut datasets = Vec::new();
        for (i, shape) in shapes.iter().enumerate() {
            let style = Style::default().fg(color::series(i));
            let lines = [
                &shape.outline,
                &shape.median,
                &shape.lower_whisker,
                &shape.upper_whisker,
            ];
            for line in lines {
                datasets.push(
                    Dataset::default()
                        .marker(Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(style)
                        .data(line),
                );
            }
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(style)
                    .data(&shape.outliers),
            );
        }

        let labels = std::iter::once(String::new())
            .chain(groups.iter().map(|g| format!("{} (n={})", g.label, g.count)))
            .chain(std::iter::once(String::new()))
            .collect::<Vec<_>>();
        let x_axis = Axis::default()
            .title(self.spec.x_label.as_str())
            .bounds([0.0, groups.len() as f64 + 1.0])
            .labels(labels);

        let chart = Chart::new(datasets)
            .block(self.block())
            .x_axis(x_axis)
            .y_axis(numeric_axis(&self.spec.y_label, y_bounds));
        Widget::render(chart, area, buf);
    }
}

/// Line segments of one box plot, in chart coordinates.
#[derive(Debug)]
struct BoxShape {
    outline: Vec<(f64, f64)>,
    median: Vec<(f64, f64)>,
    lower_whisker: Vec<(f64, f64)>,
    upper_whisker: Vec<(f64, f64)>,
    outliers: Vec<(f64, f64)>,
}

impl BoxShape {
    fn new(x: f64, group: &BoxSummary) -> Self {
        let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
        Self {
            outline: vec![
                (left, group.q1),
                (right, group.q1),
                (right, group.q3),
                (left, group.q3),
                (left, group.q1),
            ],
            median: vec![(left, group.median), (right, group.median)],
            lower_whisker: vec![(x, group.lower_whisker), (x, group.q1)],
            upper_whisker: vec![(x, group.q3), (x, group.upper_whisker)],
            outliers: group.outliers.iter().map(|&y| (x, y)).collect(),
        }
    }
}

fn numeric_axis(title: &str, bounds: [f64; 2]) -> Axis<'_> {
    Axis::default().title(title).bounds(bounds).labels([
        format!("{:.1}", bounds[0]),
        format!("{:.1}", f64::midpoint(bounds[0], bounds[1])),
        format!("{:.1}", bounds[1]),
    ])
}

/// Widens degenerate ranges so that a single value is still visible.
fn padded([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi > lo { [lo, hi] } else { [lo - 1.0, hi + 1.0] }
}
