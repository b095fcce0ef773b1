//! # fetch 命令实现
//!
//! 下载 SPARC 质量模型压缩包并解压到本地目录。
//!
//! ## 功能
//! - 压缩包已存在时跳过下载，解压目录已存在时跳过解压（`--force` 强制重做）
//! - 下载与解压都先写入 `.part` 临时路径，成功后再重命名，
//!   失败时不留下会被下次运行当作已完成的输出
//! - 调用外部 `unzip` 命令解压
//!
//! ## 依赖关系
//! - 使用 `cli/fetch.rs` 定义的参数
//! - 使用 `reqwest` 阻塞客户端下载
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::fetch::FetchArgs;
use crate::error::{BsdsError, Result};
use crate::utils::{output, progress};

use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// 执行 fetch 命令
pub fn execute(args: FetchArgs) -> Result<()> {
    output::print_header("Fetching SPARC Mass Models");

    if args.archive.exists() && !args.force {
        output::print_skip(&format!(
            "Archive already downloaded: '{}'",
            args.archive.display()
        ));
    } else {
        output::print_info(&format!("Downloading '{}'", args.url));
        let bytes = download(&args.url, &args.archive, Duration::from_secs(args.timeout))?;
        output::print_success(&format!(
            "Downloaded {} bytes to '{}'",
            bytes,
            args.archive.display()
        ));
    }

    if args.extract_dir.exists() && !args.force {
        output::print_skip(&format!(
            "Data already extracted: '{}'",
            args.extract_dir.display()
        ));
    } else {
        let spinner = progress::create_spinner("Extracting archive");
        let result = extract(&args.archive, &args.extract_dir);
        spinner.finish_and_clear();
        result?;
        output::print_success(&format!(
            "Archive extracted to '{}'",
            args.extract_dir.display()
        ));
    }

    Ok(())
}

/// 下载文件，返回写入的字节数
fn download(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    let download_err = |reason: String| BsdsError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| download_err(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| download_err(e.to_string()))?;

    if !response.status().is_success() {
        return Err(download_err(format!("HTTP status {}", response.status())));
    }

    let part = part_path(dest);
    let file = File::create(&part).map_err(|e| write_error(&part, e))?;
    let pb = progress::create_download_bar(response.content_length(), "Downloading");
    let mut writer = pb.wrap_write(BufWriter::new(file));

    let copied = response.copy_to(&mut writer);
    pb.finish_and_clear();
    let bytes = match copied {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = fs::remove_file(&part);
            return Err(download_err(e.to_string()));
        }
    };
    if let Err(e) = writer.flush() {
        drop(writer);
        let _ = fs::remove_file(&part);
        return Err(write_error(&part, e));
    }
    drop(writer);

    fs::rename(&part, dest).map_err(|e| write_error(dest, e))?;

    Ok(bytes)
}

/// `<path>.part` 临时路径（忽略末尾的路径分隔符）
fn part_path(path: &Path) -> PathBuf {
    let mut name = path.components().as_path().as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// 解压到 `<dest>.part`，成功后替换 `dest`
fn extract(archive: &Path, dest: &Path) -> Result<()> {
    if !archive.is_file() {
        return Err(BsdsError::FileNotFound {
            path: archive.display().to_string(),
        });
    }

    let staging = part_path(dest);

    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| write_error(&staging, e))?;
    }
    fs::create_dir_all(&staging).map_err(|e| write_error(&staging, e))?;

    if let Err(e) = run_unzip(archive, &staging) {
        let _ = fs::remove_dir_all(&staging);
        return Err(e);
    }

    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| write_error(dest, e))?;
    }
    fs::rename(&staging, dest).map_err(|e| write_error(dest, e))
}

fn write_error(path: &Path, source: std::io::Error) -> BsdsError {
    BsdsError::FileWriteError {
        path: path.display().to_string(),
        source,
    }
}

fn run_unzip(archive: &Path, dest: &Path) -> Result<()> {
    let result = Command::new("unzip")
        .arg("-o")
        .arg("-q")
        .arg(archive)
        .arg("-d")
        .arg(dest)
        .output();

    match result {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(BsdsError::CommandFailed {
            command: format!("unzip {}", archive.display()),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(BsdsError::CommandNotFound {
            command: "unzip".to_string(),
        }),
        Err(e) => Err(BsdsError::CommandFailed {
            command: "unzip".to_string(),
            stderr: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_archive() {
        let missing = std::env::temp_dir().join("bsds_missing_archive.zip");
        let _ = fs::remove_file(&missing);
        let err = extract(&missing, &std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, BsdsError::FileNotFound { .. }));
    }

    #[test]
    fn test_skips_when_outputs_exist() {
        let dir = std::env::temp_dir().join("bsds_fetch_skip_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("sparc_data")).unwrap();
        fs::write(dir.join("Rotmod_LTG.zip"), b"placeholder").unwrap();

        // 两个输出都存在时不访问网络
        let args = FetchArgs {
            url: "http://127.0.0.1:9/unreachable.zip".to_string(),
            archive: dir.join("Rotmod_LTG.zip"),
            extract_dir: dir.join("sparc_data"),
            force: false,
            timeout: 1,
        };
        assert!(execute(args).is_ok());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_extraction_is_not_skipped_later() {
        let dir = std::env::temp_dir().join("bsds_fetch_bad_archive_test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Rotmod_LTG.zip"), b"not a zip").unwrap();

        let args = || FetchArgs {
            url: "http://127.0.0.1:9/unreachable.zip".to_string(),
            archive: dir.join("Rotmod_LTG.zip"),
            extract_dir: dir.join("sparc_data"),
            force: false,
            timeout: 1,
        };

        // 第二次运行仍须报错，而不是把空目录当作已解压
        for _ in 0..2 {
            assert!(execute(args()).is_err());
            assert!(!dir.join("sparc_data").exists());
            assert!(!dir.join("sparc_data.part").exists());
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("data/Rotmod_LTG.zip")),
            PathBuf::from("data/Rotmod_LTG.zip.part")
        );
        assert_eq!(part_path(Path::new("sparc_data")), PathBuf::from("sparc_data.part"));
        assert_eq!(part_path(Path::new("sparc_data/")), PathBuf::from("sparc_data.part"));
    }

    #[test]
    fn test_download_unreachable_host() {
        let dest = std::env::temp_dir().join("bsds_download_fail_test.zip");
        let err = download(
            "http://127.0.0.1:9/unreachable.zip",
            &dest,
            Duration::from_secs(2),
        )
        .unwrap_err();
        assert!(matches!(err, BsdsError::DownloadFailed { .. }));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }
}
