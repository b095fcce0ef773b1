//! # bsds - 几何暗区旋转曲线工具
//!
//! 用几何暗区（BSDS）模型计算星系旋转曲线，与观测数据比较并给出 χ²。
//!
//! ## 子命令
//! - `fit`   - 对单个 rotmod 文件或整个目录求值 BSDS 模型，输出图表/CSV
//! - `fetch` - 下载并解压 SPARC 质量模型数据
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (rotmod 解析器)
//!   │     ├── bsds/      (模型计算、绘图、导出)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

use bsds::cli::Cli;
use bsds::{commands, utils};
use clap::Parser;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
