use std::cmp::Ordering;
use std::path::Path;
use log::debug;
use plotters::prelude::*;
use rondo_core::pool::ResourcePool;

pub struct PlotSeries {
    pub data: Vec<f32>,
    pub description: String,
    pub color: RGBColor,
}

/// Colour of `i`-th series, cycling through palette.
pub fn series_color(i: usize) -> RGBColor{
    let c = Palette99::pick(i).to_rgba();
    RGBColor(c.0, c.1, c.2)
}

fn bounds(series: &[PlotSeries]) -> (f32, f32){
    let values = || series.iter().flat_map(|s| s.data.iter());
    let min = values()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|n| n.min(0.0))
        .unwrap_or(0.0);
    let max = values()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|n| n.max(0.0))
        .unwrap_or(0.0);
    if min == max{
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

pub fn plot_many_series(file: &Path, title: &str, series: &[PlotSeries], x_desc: &str, y_desc: &str) -> Result<(), Box<dyn std::error::Error>>{
    let root  = SVGBackend::new(&file, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (global_min, global_max) = bounds(series);
    let length = series.iter().map(|s| s.data.len()).max().unwrap_or(0);
    debug!("Plotting {} series of length {length}: min = {global_min}; max = {global_max}", series.len());

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..length.max(1) as f32, global_min..global_max)?;

    chart.configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .disable_mesh().draw()?;

    for s in series{
        chart
            .draw_series(LineSeries::new(
                s.data.iter().enumerate().map(|(x, y)| ((x + 1) as f32, *y)),
                &s.color,
            ))?
            .label(s.description.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &s.color));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft).margin(5)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 14))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Draws pool as heat map, darker cells hold more resources.
pub fn plot_pool_heatmap(file: &Path, pool: &ResourcePool) -> Result<(), Box<dyn std::error::Error>>{
    let root = SVGBackend::new(&file, (600, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let max = pool.max_cell().max(f64::EPSILON);
    let mut chart = ChartBuilder::on(&root)
        .caption("resource pool", ("sans-serif", 30).into_font())
        .margin(5)
        .build_cartesian_2d(0..pool.width(), 0..pool.height())?;

    chart.draw_series(pool.rows().enumerate().flat_map(|(y, row)|{
        row.iter().enumerate().map(move |(x, value)|{
            let t = *value / max;
            let color = HSLColor(0.33, 0.8, 0.95 - 0.65 * t);
            Rectangle::new([(x, y), (x + 1, y + 1)], color.filled())
        })
    }))?;

    root.present()?;
    Ok(())
}
