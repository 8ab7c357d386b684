//! 任务编排：目录清理、顺序传输与完成计数

use reqwest::Client;

use super::event::{DownloadListener, Event, EventBus};
use super::fetcher::{FetchOutcome, SingleFileFetcher};
use super::job::{DownloadJob, JobSummary};
use super::reconcile;

/// 拥有一次任务的完整生命周期：清理、顺序迭代、计数与任务级事件
///
/// 整个任务在单个工作任务上运行，同一时刻只有一个文件在传输。
/// 没有任务级状态机：清理一次，然后按顺序逐个 URL 处理到结束。
pub struct DownloadOrchestrator {
    fetcher: SingleFileFetcher,
    bus: EventBus,
}

impl DownloadOrchestrator {
    pub fn new(client: Client) -> Self {
        Self {
            fetcher: SingleFileFetcher::new(client),
            bus: EventBus::new(),
        }
    }

    /// 注册一个监听器，任务开始后不再变动
    pub fn register(&mut self, listener: Box<dyn DownloadListener>) {
        self.bus.register(listener);
    }

    /// 运行整个任务
    ///
    /// 单个 URL 失败不会中断任务，只是不计入完成数；
    /// 完成数包含传输成功和已存在跳过两种情况。
    pub async fn run(&mut self, job: &DownloadJob) -> JobSummary {
        reconcile::reconcile(job.download_dir(), &job.expected_file_names(), &mut self.bus);

        self.bus.emit(Event::JobStarted);
        log::info!("任务开始，共 {} 个URL", job.urls().len());

        let mut completed_count = 0;
        for url in job.urls() {
            let dest_path = job.dest_path_of(url);
            match self.fetcher.fetch(url, &dest_path, &mut self.bus).await {
                FetchOutcome::Succeeded | FetchOutcome::Skipped => completed_count += 1,
                FetchOutcome::Failed(_) => {}
            }
        }

        self.bus.emit(Event::JobFinished);
        log::info!(
            "任务结束，完成 {}/{}",
            completed_count,
            job.urls().len()
        );

        JobSummary {
            completed_count,
            total_count: job.urls().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::test_support::RecordingListener;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_file(server: &MockServer, route: &str, body: &[u8]) {
        Mock::given(method("HEAD"))
            .and(path(route.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(route.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
    }

    fn orchestrator_with_recorder() -> (DownloadOrchestrator, RecordingListener) {
        let mut orchestrator = DownloadOrchestrator::new(Client::new());
        let recorder = RecordingListener::new();
        orchestrator.register(Box::new(recorder.clone()));
        (orchestrator, recorder)
    }

    /// 三个 URL，第二个在打开输入流时失败：失败被隔离，
    /// 事件序列和完成计数符合约定
    #[tokio::test]
    async fn test_failure_isolation_and_event_order() {
        let server = MockServer::start().await;
        serve_file(&server, "/mods/one.jar", b"first").await;
        serve_file(&server, "/mods/three.jar", b"third").await;
        Mock::given(method("HEAD"))
            .and(path("/mods/two.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/mods/two.jar"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let urls = vec![
            format!("{}/mods/one.jar", server.uri()),
            format!("{}/mods/two.jar", server.uri()),
            format!("{}/mods/three.jar", server.uri()),
        ];
        let job = DownloadJob::new(dir.path().to_str().unwrap(), urls.clone()).unwrap();

        let (mut orchestrator, recorder) = orchestrator_with_recorder();
        let summary = orchestrator.run(&job).await;

        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.total_count, 3);
        assert!(dir.path().join("one.jar").exists());
        assert!(!dir.path().join("two.jar").exists());
        assert!(dir.path().join("three.jar").exists());

        // 对比去掉 Progress 之后的完整事件序列
        let events: Vec<Event> = recorder
            .events()
            .into_iter()
            .filter(|e| !matches!(e, Event::Progress { .. }))
            .collect();
        let expected = vec![
            Event::JobStarted,
            Event::FileStarted {
                url: urls[0].clone(),
            },
            Event::UrlOpened,
            Event::ConnectionOpened,
            Event::SizeKnown { total_bytes: 5 },
            Event::InputStreamOpened,
            Event::OutputStreamOpened,
            Event::FileFinished {
                url: urls[0].clone(),
            },
            Event::FileStarted {
                url: urls[1].clone(),
            },
            Event::UrlOpened,
            Event::ConnectionOpened,
            Event::SizeKnown { total_bytes: 6 },
            Event::FileFailed {
                url: urls[1].clone(),
                reason: events_reason(&recorder),
            },
            Event::FileStarted {
                url: urls[2].clone(),
            },
            Event::UrlOpened,
            Event::ConnectionOpened,
            Event::SizeKnown { total_bytes: 5 },
            Event::InputStreamOpened,
            Event::OutputStreamOpened,
            Event::FileFinished {
                url: urls[2].clone(),
            },
            Event::JobFinished,
        ];
        assert_eq!(events, expected);
    }

    fn events_reason(recorder: &RecordingListener) -> String {
        recorder
            .events()
            .into_iter()
            .find_map(|e| match e {
                Event::FileFailed { reason, .. } => Some(reason),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// 目录里有 old.jar 和 keep.jar，期望集合是 {keep.jar, new.jar}：
    /// old.jar 被清理一次，keep.jar 原样保留，new.jar 被下载
    #[tokio::test]
    async fn test_reconcile_then_download() {
        let server = MockServer::start().await;
        serve_file(&server, "/mods/keep.jar", b"fresh keep").await;
        serve_file(&server, "/mods/new.jar", b"brand new").await;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("old.jar"), b"stale").unwrap();
        std::fs::write(dir.path().join("keep.jar"), b"local keep").unwrap();

        let urls = vec![
            format!("{}/mods/keep.jar", server.uri()),
            format!("{}/mods/new.jar", server.uri()),
        ];
        let job = DownloadJob::new(dir.path().to_str().unwrap(), urls).unwrap();

        let (mut orchestrator, recorder) = orchestrator_with_recorder();
        let summary = orchestrator.run(&job).await;

        // keep.jar 已存在：跳过也计入完成数
        assert_eq!(summary.completed_count, 2);
        assert!(!dir.path().join("old.jar").exists());
        assert_eq!(
            std::fs::read(dir.path().join("keep.jar")).unwrap(),
            b"local keep"
        );
        assert_eq!(
            std::fs::read(dir.path().join("new.jar")).unwrap(),
            b"brand new"
        );

        let events = recorder.events();
        let pruned: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::FilePruned { .. }))
            .collect();
        assert_eq!(
            pruned,
            vec![&Event::FilePruned {
                name: "old.jar".to_string()
            }]
        );
        // 清理发生在 JobStarted 之前
        let started_idx = events.iter().position(|e| *e == Event::JobStarted).unwrap();
        let pruned_idx = events
            .iter()
            .position(|e| matches!(e, Event::FilePruned { .. }))
            .unwrap();
        assert!(pruned_idx < started_idx);
    }

    /// 文件 i+1 的事件不会早于文件 i 的终结事件
    #[tokio::test]
    async fn test_strict_sequential_ordering() {
        let server = MockServer::start().await;
        serve_file(&server, "/mods/a.jar", b"aaa").await;
        serve_file(&server, "/mods/b.jar", b"bbb").await;

        let dir = tempdir().unwrap();
        let urls = vec![
            format!("{}/mods/a.jar", server.uri()),
            format!("{}/mods/b.jar", server.uri()),
        ];
        let job = DownloadJob::new(dir.path().to_str().unwrap(), urls.clone()).unwrap();

        let (mut orchestrator, recorder) = orchestrator_with_recorder();
        orchestrator.run(&job).await;

        let events = recorder.events();
        let first_done = events
            .iter()
            .position(|e| *e == Event::FileFinished { url: urls[0].clone() })
            .unwrap();
        let second_start = events
            .iter()
            .position(|e| *e == Event::FileStarted { url: urls[1].clone() })
            .unwrap();
        assert!(first_done < second_start);
    }
}
