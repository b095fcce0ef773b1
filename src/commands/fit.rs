//! # fit 子命令实现
//!
//! 读取 SPARC rotmod 数据，计算 BSDS 模型曲线与 χ²，输出图表/数据并打印摘要。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 并行拟合（rayon）
//! - 输出图像 (PNG/SVG) 或曲线数据 (CSV)
//! - 批量模式按 χ²/N 排名并可导出汇总表
//!
//! ## 依赖关系
//! - 使用 `cli/fit.rs` 定义的 FitArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `bsds/` 模块进行计算、绘图和导出
//! - 使用 `parsers/` 读取数据

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::bsds::export::SummaryRow;
use crate::bsds::{self, BsdsModel, FitResult};
use crate::cli::fit::{FitArgs, FitOutputFormat};
use crate::error::{BsdsError, Result};
use crate::models::RotationCurve;
use crate::parsers;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};

/// 执行 fit 命令
pub fn execute(args: FitArgs) -> Result<()> {
    output::print_header("BSDS Rotation Curve Fit");

    // 参数在读取任何数据之前校验
    let model = BsdsModel::new(args.model_params())?;
    let p = model.params();
    output::print_info(&format!(
        "Model: Mb = {:.2e} Msun, rs = {} kpc, n = {}, k0 = {}",
        p.baryonic_mass, p.screening_radius, p.screening_exponent, p.k0
    ));

    if args.input.is_file() {
        execute_single_file(&args, &model)
    } else if args.input.is_dir() {
        execute_batch(&args, &model)
    } else {
        Err(BsdsError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(args: &FitArgs, model: &BsdsModel) -> Result<()> {
    let curve = parsers::parse_curve_file(&args.input)?;

    output::print_success(&format!(
        "Loaded mass-model data: {} (N = {})",
        curve.name(),
        curve.len()
    ));
    if !curve.has_bulge() {
        output::print_info("No bulge column, using Vbul = 0");
    }

    let result = model.evaluate(&curve)?;

    let saved = if args.no_plot {
        None
    } else {
        let format = args.format.unwrap_or_else(|| match &args.output {
            Some(path) => guess_format_from_extension(path),
            None => FitOutputFormat::Png,
        });
        let path = match &args.output {
            Some(path) => path.clone(),
            None => default_output_path(&args.input, format),
        };
        let title = args
            .title
            .clone()
            .unwrap_or_else(|| default_title(curve.name()));

        write_output(&curve, &result, &path, format, &title, args.width, args.height)?;
        Some(path)
    };

    print_fit_summary(&args.input, &curve, &result, saved.as_deref());
    print_residual_table(&curve, &result, args.top_n);

    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &FitArgs, model: &BsdsModel) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} mass-model files", files.len()));

    let output_dir = args.output.clone().unwrap_or_else(|| args.input.clone());
    if !args.no_plot {
        fs::create_dir_all(&output_dir).map_err(|e| BsdsError::FileWriteError {
            path: output_dir.display().to_string(),
            source: e,
        })?;
    }

    let format = args.format.unwrap_or(FitOutputFormat::Png);

    let config = Arc::new(BatchFitConfig {
        model: *model,
        output_dir,
        format: (!args.no_plot).then_some(format),
        width: args.width,
        height: args.height,
        overwrite: args.overwrite,
    });

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running on {} thread(s)", runner.jobs()));
    let result = runner.run(files, |file| process_batch_file(file, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} files, {} success, {} skipped, {} failed",
        result.total(),
        result.success(),
        result.skipped,
        result.failed()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    let mut rows = result.successes;
    rows.sort_by(|a, b| a.chi2_per_point.total_cmp(&b.chi2_per_point));

    print_ranking_table(&rows, args.top_n);

    if let Some(ref summary_path) = args.summary {
        bsds::export::summary_to_csv(&rows, summary_path)?;
        output::print_success(&format!(
            "Summary saved to '{}'",
            summary_path.display()
        ));
    }

    Ok(())
}

/// 批量处理配置
struct BatchFitConfig {
    model: BsdsModel,
    output_dir: PathBuf,
    /// `None` 表示不写输出文件
    format: Option<FitOutputFormat>,
    width: u32,
    height: u32,
    overwrite: bool,
}

/// 处理批量模式中的单个文件
fn process_batch_file(
    input: &PathBuf,
    config: &Arc<BatchFitConfig>,
) -> ProcessResult<SummaryRow> {
    let output_file = config.format.map(|format| {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        config
            .output_dir
            .join(format!("{}_BSDS.{}", stem, format.extension()))
    });

    if let Some(ref path) = output_file {
        if path.exists() && !config.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                path.display()
            ));
        }
    }

    match fit_file(input, output_file.as_deref(), config) {
        Ok(row) => ProcessResult::Success(row),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 读取、求值并（可选）输出单个文件
fn fit_file(input: &Path, output: Option<&Path>, config: &BatchFitConfig) -> Result<SummaryRow> {
    let curve = parsers::parse_curve_file(input)?;
    let result = config.model.evaluate(&curve)?;

    if let (Some(path), Some(format)) = (output, config.format) {
        write_output(
            &curve,
            &result,
            path,
            format,
            &default_title(curve.name()),
            config.width,
            config.height,
        )?;
    }

    Ok(SummaryRow::new(curve.name(), &result))
}

/// 按格式写出图表或数据
fn write_output(
    curve: &RotationCurve,
    result: &FitResult,
    path: &Path,
    format: FitOutputFormat,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    match format {
        FitOutputFormat::Png | FitOutputFormat::Svg => bsds::plot::generate_fit_plot(
            curve,
            result,
            path,
            title,
            width,
            height,
            format == FitOutputFormat::Svg,
        ),
        FitOutputFormat::Csv => bsds::export::to_csv(curve, result, path),
    }
}

/// 默认输出路径：与输入同目录的 `<stem>_BSDS.<ext>`
fn default_output_path(input: &Path, format: FitOutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_BSDS.{}", stem, format.extension()))
}

fn default_title(name: &str) -> String {
    format!("{} - BSDS Rotation Curve", name)
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> FitOutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => FitOutputFormat::Svg,
        Some("csv") => FitOutputFormat::Csv,
        _ => FitOutputFormat::Png,
    }
}

/// 打印拟合摘要
fn print_fit_summary(
    input: &Path,
    curve: &RotationCurve,
    result: &FitResult,
    saved: Option<&Path>,
) {
    output::print_header("BSDS Fit Complete");
    output::print_kv("Galaxy file", &input.display().to_string());
    output::print_kv("Data points", &curve.len().to_string());
    if let Some(d) = curve.distance_mpc() {
        output::print_kv("Distance", &format!("{} Mpc", d));
    }
    output::print_kv(
        "Mb used",
        &format!("{:.2e} Msun", result.params.baryonic_mass),
    );
    output::print_kv("k(Mb)", &format!("{:.4}", result.coupling));
    output::print_kv("chi²", &format!("{:.1}", result.chi2));
    output::print_kv("chi²/N", &format!("{:.2}", result.chi2_per_point()));
    if let Some(path) = saved {
        output::print_kv("Saved output", &path.display().to_string());
    }
    println!();
}

/// 打印残差最大的数据点
fn print_residual_table(curve: &RotationCurve, result: &FitResult, count: usize) {
    #[derive(Tabled)]
    struct ResidualRow {
        #[tabled(rename = "R (kpc)")]
        radius: String,
        #[tabled(rename = "Vobs")]
        v_obs: String,
        #[tabled(rename = "Vbary")]
        v_bary: String,
        #[tabled(rename = "Vbsds")]
        v_bsds: String,
        #[tabled(rename = "Vtot")]
        v_total: String,
        #[tabled(rename = "(Vtot-Vobs)/err")]
        pull: String,
    }

    let mut indices: Vec<(usize, f64)> = (0..curve.len())
        .map(|i| (i, (result.v_total[i] - curve.v_obs()[i]) / curve.v_err()[i]))
        .collect();
    indices.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    let rows: Vec<ResidualRow> = indices
        .into_iter()
        .take(count)
        .map(|(i, pull)| ResidualRow {
            radius: format!("{:.2}", curve.radius()[i]),
            v_obs: format!("{:.1} ± {:.1}", curve.v_obs()[i], curve.v_err()[i]),
            v_bary: format!("{:.1}", result.v_bary[i]),
            v_bsds: format!("{:.1}", result.v_bsds[i]),
            v_total: format!("{:.1}", result.v_total[i]),
            pull: format!("{:+.2}", pull),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("Largest {} Residuals", rows.len()));
        println!("{}", Table::new(&rows));
    }
}

/// 打印批量排名表
fn print_ranking_table(rows: &[SummaryRow], count: usize) {
    #[derive(Tabled)]
    struct RankRow {
        #[tabled(rename = "Rank")]
        rank: usize,
        #[tabled(rename = "Galaxy")]
        galaxy: String,
        #[tabled(rename = "N")]
        n_points: usize,
        #[tabled(rename = "k(Mb)")]
        coupling: String,
        #[tabled(rename = "chi²")]
        chi2: String,
        #[tabled(rename = "chi²/N")]
        chi2_per_point: String,
    }

    let table_rows: Vec<RankRow> = rows
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, r)| RankRow {
            rank: i + 1,
            galaxy: r.galaxy.clone(),
            n_points: r.n_points,
            coupling: format!("{:.4}", r.coupling),
            chi2: format!("{:.1}", r.chi2),
            chi2_per_point: format!("{:.2}", r.chi2_per_point),
        })
        .collect();

    if !table_rows.is_empty() {
        output::print_header(&format!("Top {} Galaxies by chi²/N", table_rows.len()));
        println!("{}", Table::new(&table_rows));
    }
}
