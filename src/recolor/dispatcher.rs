//! # 分带调度模块
//!
//! ## 设计思路
//!
//! 把整幅图按行切成 N 个水平分带，每个分带交给一个工作线程，
//! 全部完成后再返回。处理链路固定为：
//! 1. 校验工作线程数与源/目标尺寸
//! 2. 计算分带边界（`height / N`，整除）
//! 3. 用 `split_at_mut` 切出互不重叠的目标分带视图
//! 4. 在大小为 N 的专用线程池中为每个分带派发一个任务
//! 5. 等待全部任务结束，汇总各分带结果
//!
//! ## 实现思路
//!
//! - 每个任务把结果写入自己独占的结果槽，不共享可变状态，不加锁。
//! - 任务内的 panic 由 `catch_unwind` 捕获并转为分带失败记录。
//! - `N == 1` 时在调用线程上同步处理整幅图，作为并行结果的对照基线。
//! - 默认策略下，`height % N` 的末尾行保持原样；可通过
//!   `BandRemainder::AbsorbIntoLastBand` 让最后一个分带吸收余数行。

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use super::grid::{BandMut, PixelGrid, Region};
use super::region::process_region;
use super::config::ensure_worker_count;
use super::{BandFault, BandRemainder, RecolorConfig, RecolorError};

/// 一次重新着色的执行摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecolorSummary {
    /// 实际派发的分带。
    pub bands: Vec<Region>,
    /// 写入目标图的像素总数。
    pub pixels_written: usize,
    /// 未被任何分带覆盖、保持原样的末尾行数。
    pub untouched_rows: u32,
}

/// 计算 N 个全宽分带。
///
/// 分带高度为 `height / worker_count`；当 `worker_count > height` 时分带高度为 0，
/// 每个分带都是空操作。
pub fn partition_bands(
    width: u32,
    height: u32,
    worker_count: usize,
    remainder: BandRemainder,
) -> Result<Vec<Region>, RecolorError> {
    ensure_worker_count(worker_count)?;

    // 超过 u32 的线程数必然大于图像高度，分带高度为 0。
    let band_height = u32::try_from(worker_count).map_or(0, |n| height / n);

    let mut bands: Vec<Region> = (0..worker_count)
        .map(|index| {
            let top = u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_mul(band_height))
                .unwrap_or(height)
                .min(height);
            Region::new(0, top, width, band_height)
        })
        .collect();

    if remainder == BandRemainder::AbsorbIntoLastBand {
        if let Some(last) = bands.last_mut() {
            last.height = height - last.top;
        }
    }

    Ok(bands)
}

/// 核心入口：按 `worker_count` 个分带并行重新着色。
///
/// 余数行保持原样（`BandRemainder::Leave`）。
pub fn recolor_parallel(
    source: &PixelGrid,
    destination: &mut PixelGrid,
    worker_count: usize,
) -> Result<RecolorSummary, RecolorError> {
    let config = RecolorConfig::default().with_worker_count(worker_count);
    recolor_with_config(source, destination, &config)
}

/// 单线程基线：在调用线程上一次处理整幅图。
pub fn recolor_sequential(
    source: &PixelGrid,
    destination: &mut PixelGrid,
) -> Result<RecolorSummary, RecolorError> {
    recolor_parallel(source, destination, 1)
}

/// 按配置执行重新着色。
pub fn recolor_with_config(
    source: &PixelGrid,
    destination: &mut PixelGrid,
    config: &RecolorConfig,
) -> Result<RecolorSummary, RecolorError> {
    ensure_worker_count(config.worker_count)?;
    ensure_same_dimensions(source, destination)?;

    let (width, height) = source.dimensions();
    let regions = partition_bands(width, height, config.worker_count, config.remainder)?;
    let covered_rows: u32 = regions.iter().map(|r| r.clipped_rows(height)).sum();
    let untouched_rows = height - covered_rows;

    log::debug!(
        "🧩 分带布局：{}x{} -> {} 个分带（band_height={}，未处理末尾行={}）",
        width,
        height,
        regions.len(),
        regions.first().map_or(0, |r| r.height),
        untouched_rows
    );

    let started = Instant::now();
    let mut bands = destination.split_bands(&regions)?;

    let outcomes: Vec<Result<usize, BandFault>> = if config.worker_count == 1 {
        regions
            .iter()
            .zip(bands.iter_mut())
            .enumerate()
            .map(|(index, (&region, band))| run_band(index, || process_region(source, band, region)))
            .collect()
    } else {
        run_bands_in_pool(source, &regions, bands, config.worker_count)?
    };

    let pixels_written = collect_outcomes(outcomes)?;

    log::info!(
        "✅ 重新着色完成 - 分带: {} 像素: {} 未处理末尾行: {} 耗时: {} ms",
        regions.len(),
        pixels_written,
        untouched_rows,
        started.elapsed().as_millis()
    );

    Ok(RecolorSummary {
        bands: regions,
        pixels_written,
        untouched_rows,
    })
}

pub(crate) fn ensure_same_dimensions(
    source: &PixelGrid,
    destination: &PixelGrid,
) -> Result<(), RecolorError> {
    if source.dimensions() != destination.dimensions() {
        return Err(RecolorError::DimensionMismatch {
            source_width: source.width(),
            source_height: source.height(),
            destination_width: destination.width(),
            destination_height: destination.height(),
        });
    }
    Ok(())
}

/// 在专用线程池中为每个分带派发一个任务，并等待全部完成。
fn run_bands_in_pool(
    source: &PixelGrid,
    regions: &[Region],
    bands: Vec<BandMut<'_>>,
    worker_count: usize,
) -> Result<Vec<Result<usize, BandFault>>, RecolorError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|index| format!("recolor-worker-{index}"))
        .build()
        .map_err(|e| RecolorError::ThreadPool(e.to_string()))?;

    let mut outcomes: Vec<Result<usize, BandFault>> = (0..regions.len()).map(|_| Ok(0)).collect();

    pool.scope(|scope| {
        for (index, ((&region, mut band), slot)) in regions
            .iter()
            .zip(bands)
            .zip(outcomes.iter_mut())
            .enumerate()
        {
            scope.spawn(move |_| {
                *slot = run_band(index, || process_region(source, &mut band, region));
            });
        }
    });

    Ok(outcomes)
}

/// 执行单个分带的处理，panic 也转换为分带失败记录。
fn run_band<F>(index: usize, work: F) -> Result<usize, BandFault>
where
    F: FnOnce() -> Result<usize, RecolorError>,
{
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(written)) => Ok(written),
        Ok(Err(err)) => Err(BandFault {
            band: index,
            reason: err.to_string(),
        }),
        Err(payload) => Err(BandFault {
            band: index,
            reason: panic_message(payload.as_ref()),
        }),
    }
}

/// 所有分带结束后汇总：任一失败即返回单个聚合错误。
fn collect_outcomes(outcomes: Vec<Result<usize, BandFault>>) -> Result<usize, RecolorError> {
    let total = outcomes.len();
    let mut pixels_written = 0usize;
    let mut faults = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(written) => pixels_written += written,
            Err(fault) => {
                log::warn!("⚠️ {}", fault);
                faults.push(fault);
            }
        }
    }

    let failed = faults.len();
    match faults.into_iter().next() {
        None => Ok(pixels_written),
        Some(first) => Err(RecolorError::WorkerFault {
            failed,
            total,
            first,
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("工作线程 panic：{}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("工作线程 panic：{}", message)
    } else {
        "工作线程 panic：未知原因".to_string()
    }
}
