//! # 旋转曲线图表生成
//!
//! 使用 `plotters` 库生成 BSDS 拟合诊断图。
//!
//! ## 图层
//! - 观测速度（带误差棒的黑点）
//! - 仅重子 / 仅 BSDS / 重子 + BSDS 三条模型曲线
//! - 图例与浅色网格
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `bsds/fit.rs` 的 FitResult 和 `models/galaxy.rs` 的 RotationCurve
//! - 使用 `plotters` 渲染图表

use crate::bsds::FitResult;
use crate::error::{BsdsError, Result};
use crate::models::RotationCurve;

use plotters::prelude::*;
use std::path::Path;

const BARY_COLOR: RGBColor = RGBColor(0, 102, 204);
const BSDS_COLOR: RGBColor = RGBColor(214, 39, 40);
const TOTAL_COLOR: RGBColor = RGBColor(44, 160, 44);

/// 生成拟合图（PNG 或 SVG）
pub fn generate_fit_plot(
    curve: &RotationCurve,
    result: &FitResult,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_fit_chart(&root, curve, result, title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_fit_chart(&root, curve, result, title)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 绘制拟合图的核心逻辑
fn draw_fit_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &RotationCurve,
    result: &FitResult,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (x_max, y_max) = axis_limits(curve, result);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Radius (kpc)")
        .y_desc("Velocity (km/s)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(plot_err)?;

    let radius = curve.radius();

    // 观测值与误差棒
    chart
        .draw_series(
            radius
                .iter()
                .zip(curve.v_obs())
                .zip(curve.v_err())
                .map(|((&r, &v), &e)| {
                    ErrorBar::new_vertical(
                        r,
                        (v - e).max(0.0),
                        v,
                        v + e,
                        BLACK.stroke_width(1),
                        6,
                    )
                }),
        )
        .map_err(plot_err)?;

    chart
        .draw_series(
            radius
                .iter()
                .zip(curve.v_obs())
                .map(|(&r, &v)| Circle::new((r, v), 4, BLACK.filled())),
        )
        .map_err(plot_err)?
        .label("Observed")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.filled()));

    // 三条模型曲线
    for (values, label, color) in [
        (&result.v_bary, "Baryons only", BARY_COLOR),
        (&result.v_bsds, "BSDS only", BSDS_COLOR),
        (&result.v_total, "Baryons + BSDS", TOTAL_COLOR),
    ] {
        chart
            .draw_series(LineSeries::new(
                radius.iter().zip(values.iter()).map(|(&r, &v)| (r, v)),
                color.stroke_width(2),
            ))
            .map_err(plot_err)?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font(("sans-serif", 15))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    // 拟合信息
    let info = format!(
        "Mb = {:.2e} Msun   k(Mb) = {:.4}   χ² = {:.1}",
        result.params.baryonic_mass, result.coupling, result.chi2
    );
    chart
        .draw_series(std::iter::once(Text::new(
            info,
            (x_max * 0.03, y_max * 0.95),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(plot_err)?;

    Ok(())
}

/// 坐标轴上限：留出 5% / 10% 边距
fn axis_limits(curve: &RotationCurve, result: &FitResult) -> (f64, f64) {
    let x_max = curve.max_radius().max(1.0) * 1.05;

    let obs_max = curve
        .v_obs()
        .iter()
        .zip(curve.v_err())
        .map(|(v, e)| v + e)
        .fold(0.0_f64, f64::max);
    let model_max = result
        .v_total
        .iter()
        .chain(&result.v_bary)
        .chain(&result.v_bsds)
        .copied()
        .fold(0.0_f64, f64::max);

    let y_max = obs_max.max(model_max).max(10.0) * 1.1;
    (x_max, y_max)
}

fn plot_err<E: std::fmt::Debug>(e: E) -> BsdsError {
    BsdsError::PlotError(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsds::BsdsModel;
    use crate::models::params::SPARC_K0;
    use crate::models::ModelParams;

    fn sample() -> (RotationCurve, FitResult) {
        let curve = RotationCurve::new(
            "plot-test",
            vec![1.0, 4.0, 8.0, 20.0],
            vec![60.0, 110.0, 140.0, 150.0],
            vec![5.0, 4.0, 6.0, 10.0],
            vec![10.0, 20.0, 25.0, 30.0],
            vec![55.0, 90.0, 95.0, 70.0],
            None,
        )
        .unwrap();
        let result = BsdsModel::new(ModelParams::new(5e10, SPARC_K0))
            .unwrap()
            .evaluate(&curve)
            .unwrap();
        (curve, result)
    }

    #[test]
    fn test_axis_limits_cover_data() {
        let (curve, result) = sample();
        let (x_max, y_max) = axis_limits(&curve, &result);
        assert!((x_max - 21.0).abs() < 1e-12);
        assert!(y_max >= 160.0 * 1.1 - 1e-9);
        assert!(result.v_total.iter().all(|&v| v < y_max));
    }
}
