//! # SPARC rotmod 格式解析器
//!
//! 解析 SPARC 质量模型文件（`*_rotmod.dat`）。
//!
//! ## 格式说明
//! ```text
//! # Distance = 13.8 Mpc
//! # Rad   Vobs    errV    Vgas    Vdisk   Vbul    SBdisk  SBbul
//! # kpc   km/s    km/s    km/s    km/s    km/s    L/pc^2  L/pc^2
//! 0.32    24.40   35.90   6.49    36.34   0.00    1020.30 0.00
//! ...
//! ```
//! 按列位置读取：半径、观测速度、误差、气体、恒星盘、[核球]。
//! 只有 5 列时核球以零填充，多余的列（面亮度）忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/galaxy.rs`
//! - 使用 `regex` 提取文件头中的距离

use crate::error::{BsdsError, Result};
use crate::models::RotationCurve;

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// 最少列数: R, Vobs, errV, Vgas, Vdisk
const MIN_COLUMNS: usize = 5;

static DISTANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#\s*distance\s*=\s*([0-9.eE+-]+)\s*mpc").expect("valid distance regex")
});

/// 解析 rotmod 文件
pub fn parse_rotmod_file(path: &Path) -> Result<RotationCurve> {
    if !path.is_file() {
        return Err(BsdsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| BsdsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rotmod_content(&content, &galaxy_name(path)).map_err(|e| match e {
        BsdsError::ParseError { format, reason, .. } => BsdsError::ParseError {
            format,
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// 从字符串内容解析 rotmod 格式
pub fn parse_rotmod_content(content: &str, name: &str) -> Result<RotationCurve> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut n_columns: Option<usize> = None;
    let mut distance_mpc: Option<f64> = None;

    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            if let Some(caps) = DISTANCE_RE.captures(line) {
                distance_mpc = caps[1].parse().ok();
            }
            continue;
        }

        // 行尾注释
        let data = line.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            continue;
        }

        let values = data
            .split_whitespace()
            .map(|tok| tok.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| parse_error(name, format!("line {}: {}", line_no + 1, e)))?;

        match n_columns {
            None => {
                if values.len() < MIN_COLUMNS {
                    return Err(parse_error(
                        name,
                        format!(
                            "line {}: expected at least {} columns, found {}",
                            line_no + 1,
                            MIN_COLUMNS,
                            values.len()
                        ),
                    ));
                }
                n_columns = Some(values.len());
            }
            Some(n) if n != values.len() => {
                return Err(parse_error(
                    name,
                    format!(
                        "line {}: expected {} columns, found {}",
                        line_no + 1,
                        n,
                        values.len()
                    ),
                ));
            }
            Some(_) => {}
        }

        rows.push(values);
    }

    let n_columns = n_columns.ok_or_else(|| parse_error(name, "no data rows".to_string()))?;

    let column = |i: usize| rows.iter().map(|row| row[i]).collect::<Vec<f64>>();
    let bulge = (n_columns > MIN_COLUMNS).then(|| column(5));

    let curve = RotationCurve::new(
        name,
        column(0),
        column(1),
        column(2),
        column(3),
        column(4),
        bulge,
    )?;

    Ok(curve.with_distance(distance_mpc))
}

/// 由文件名推断星系名称（去掉 `_rotmod` 后缀）
pub fn galaxy_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    stem.strip_suffix("_rotmod").unwrap_or(stem).to_string()
}

fn parse_error(name: &str, reason: String) -> BsdsError {
    BsdsError::ParseError {
        format: "rotmod".to_string(),
        path: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NGC_SAMPLE: &str = r#"# Distance = 13.8 Mpc
# Rad	Vobs	errV	Vgas	Vdisk	Vbul	SBdisk	SBbul
# kpc	km/s	km/s	km/s	km/s	km/s	L/pc^2	L/pc^2
0.32	24.40	35.90	6.49	36.34	0.00	1020.30	0.00
0.64	43.30	16.30	12.65	61.10	0.00	812.71	0.00
1.29	80.90	7.64	22.06	86.63	0.00	510.63	0.00
1.93	98.50	6.71	26.34	100.44	0.00	334.67	0.00
"#;

    #[test]
    fn test_parse_sparc_sample() {
        let curve = parse_rotmod_content(NGC_SAMPLE, "NGC3198").unwrap();
        assert_eq!(curve.name(), "NGC3198");
        assert_eq!(curve.len(), 4);
        assert!(curve.has_bulge());
        assert_eq!(curve.distance_mpc(), Some(13.8));
        assert_eq!(curve.radius(), &[0.32, 0.64, 1.29, 1.93]);
        assert_eq!(curve.v_err()[2], 7.64);
        assert_eq!(curve.v_disk()[3], 100.44);
    }

    #[test]
    fn test_parse_five_columns_zero_bulge() {
        let content = "1.0 50.0 5.0 10.0 40.0\n2.0 70.0 4.0 15.0 55.0\n";
        let curve = parse_rotmod_content(content, "five").unwrap();
        assert!(!curve.has_bulge());
        assert_eq!(curve.v_bulge(), &[0.0, 0.0]);
        assert_eq!(curve.distance_mpc(), None);
    }

    #[test]
    fn test_parse_too_few_columns() {
        let content = "1.0 50.0 5.0 10.0\n2.0 70.0 4.0 15.0\n";
        assert!(matches!(
            parse_rotmod_content(content, "short"),
            Err(BsdsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let content = "1.0 50.0 5.0 10.0 40.0 0.0\n2.0 70.0 4.0 15.0 55.0\n";
        assert!(parse_rotmod_content(content, "ragged").is_err());
    }

    #[test]
    fn test_parse_bad_number() {
        let content = "1.0 50.0 abc 10.0 40.0\n";
        let err = parse_rotmod_content(content, "bad").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_rotmod_content("# only comments\n\n", "empty").is_err());
    }

    #[test]
    fn test_validation_propagates() {
        // 零误差在解析阶段即被拒绝
        let content = "1.0 50.0 0.0 10.0 40.0\n2.0 70.0 4.0 15.0 55.0\n";
        assert!(matches!(
            parse_rotmod_content(content, "zero-err"),
            Err(BsdsError::NonPositiveUncertainty { index: 0, .. })
        ));
    }

    #[test]
    fn test_galaxy_name() {
        assert_eq!(
            galaxy_name(Path::new("sparc_data/NGC3198_rotmod.dat")),
            "NGC3198"
        );
        assert_eq!(galaxy_name(Path::new("custom.dat")), "custom");
    }
}
