use anyhow::Result;
use log::LevelFilter;

use modsync::cli;
use modsync::core::{DownloadJob, DownloadOrchestrator};
use modsync::ui::{self, ConsoleListener};
use modsync::utils::logger;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init(LevelFilter::Info);
    log::info!("程序启动");

    // 解析参数和配置
    let (args, config) = match cli::Args::parse_args() {
        Ok(pair) => pair,
        Err(e) => {
            log::error!("参数解析失败: {}", e);
            eprintln!("参数解析失败: {}", e);
            std::process::exit(1);
        }
    };

    println!("配置加载成功");
    println!("{}", config.get_summary());

    let client = config.build_client();

    // 获取下载URL列表，失败对整个运行是致命的
    let provider = args.make_provider(&client);
    let urls = match provider.fetch_urls().await {
        Ok(urls) => urls,
        Err(e) => {
            log::error!("获取URL列表失败: {}", e);
            eprintln!("获取URL列表失败: {}", e);
            std::process::exit(1);
        }
    };

    let job = match DownloadJob::new(&config.download_dir, urls) {
        Ok(job) => job,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("下载目录: {}", job.download_dir());
    log::info!("任务包含 {} 个URL", job.urls().len());

    let mut orchestrator = DownloadOrchestrator::new(client);
    orchestrator.register(Box::new(ConsoleListener::new(job.urls().len())));

    // 下载在独立的工作任务上严格顺序执行，这里只等待完成
    let started = std::time::Instant::now();
    let summary = tokio::spawn(async move { orchestrator.run(&job).await }).await?;

    let report = ui::DownloadSummary {
        total_files: summary.total_count,
        success_count: summary.completed_count,
        failed_count: summary.total_count - summary.completed_count,
        elapsed_time: started.elapsed(),
    };
    println!("{}", report);
    log::info!(
        "下载完成 - 成功: {}, 失败: {}",
        report.success_count,
        report.failed_count
    );

    if summary.completed_count < summary.total_count {
        std::process::exit(1);
    }
    Ok(())
}
