//! # 灰色调重新着色工具 — 应用入口
//!
//! 用法：`gray-recolor [INPUT] [OUTPUT] [WORKERS]`
//!
//! 设置文件路径可通过 `GRAY_RECOLOR_SETTINGS` 环境变量指定（JSON）。
//! 本文件只负责参数、日志与阶段编排，业务逻辑见 `lib.rs`。

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use gray_recolor::recolor::{self, worker_count_from_i64, PixelGrid, RecolorConfig, RecolorSettings};
use gray_recolor::{image_io, AppError};

const SOURCE_FILE: &str = "./resources/many-flowers.jpg";
const DESTINATION_FILE: &str = "./out/many-flowers.jpg";
const SETTINGS_ENV: &str = "GRAY_RECOLOR_SETTINGS";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 重新着色失败: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), AppError> {
    let source_path = PathBuf::from(args.first().map_or(SOURCE_FILE, String::as_str));
    let destination_path = PathBuf::from(args.get(1).map_or(DESTINATION_FILE, String::as_str));

    let mut config = load_config(std::env::var_os(SETTINGS_ENV).as_deref().map(Path::new))?;
    if let Some(workers) = args.get(2) {
        config = apply_worker_override(config, workers)?;
    }

    log::info!(
        "⚙️ 配置：workers={} remainder={} max_pixels={}",
        config.worker_count,
        config.remainder.as_str(),
        config.max_decoded_pixels
    );

    let total_start = Instant::now();

    let load_start = Instant::now();
    let source = image_io::load_pixel_grid(&source_path, &config)?;
    let load_ms = load_start.elapsed().as_millis();

    let mut destination = PixelGrid::filled(source.width(), source.height(), 0);

    let recolor_start = Instant::now();
    let summary = recolor::recolor_with_config(&source, &mut destination, &config)?;
    let recolor_ms = recolor_start.elapsed().as_millis();

    if summary.untouched_rows > 0 {
        log::warn!(
            "⚠️ 高度 {} 不能被 {} 整除，末尾 {} 行未处理",
            source.height(),
            config.worker_count,
            summary.untouched_rows
        );
    }

    let save_start = Instant::now();
    image_io::save_pixel_grid(&destination, &destination_path)?;
    let save_ms = save_start.elapsed().as_millis();

    log::info!(
        "⏱️ 阶段耗时 - load: {} ms recolor: {} ms save: {} ms total: {} ms",
        load_ms,
        recolor_ms,
        save_ms,
        total_start.elapsed().as_millis()
    );

    Ok(())
}

/// 命令行中的工作线程数覆盖配置值，非正数直接拒绝。
fn apply_worker_override(config: RecolorConfig, raw: &str) -> Result<RecolorConfig, AppError> {
    let parsed: i64 = raw
        .trim()
        .parse()
        .map_err(|e| AppError::Settings(format!("无效的工作线程数 {raw}: {e}")))?;
    Ok(config.with_worker_count(worker_count_from_i64(parsed)?))
}

/// 读取设置文件；未指定时使用默认配置。
fn load_config(path: Option<&Path>) -> Result<RecolorConfig, AppError> {
    let Some(path) = path else {
        return Ok(RecolorConfig::default());
    };

    log::info!("📄 读取设置文件: {}", path.display());
    RecolorSettings::load(path)
        .and_then(RecolorSettings::into_config)
        .map_err(|e| AppError::Settings(format!("{}: {e}", path.display())))
}
