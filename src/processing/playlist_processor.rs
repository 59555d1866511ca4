use log::{error, info, warn};

use crate::m3u_channels_error::M3uChannelsError;
use crate::model::{ChannelRecord, Config, RunStats};
use crate::processing::parser::m3u::consume_m3u;
use crate::repository::aggregate_repository::write_aggregate;
use crate::repository::channel_repository::{prepare_channel_dir, write_channel};
use crate::repository::html_repository::write_html_index;
use crate::utils::network::probe::{HttpProbe, StreamProbe};
use crate::utils::network::request::{create_client, get_input_text_content, sanitize_sensitive_info};
use crate::utils::StepMeasure;

/// Fetches the source and runs the pipeline. Only a failed fetch is returned as error.
pub fn process_playlist(cfg: &Config, input: Option<&str>) -> Result<RunStats, M3uChannelsError> {
    let url = input.unwrap_or(cfg.source.url.as_str());
    info!("fetching playlist {}", sanitize_sensitive_info(url));
    let client = create_client(cfg.source.timeout())?;
    let persist_path = cfg.persist_path();
    let source = get_input_text_content(&client, cfg.working_path(), url, persist_path.as_deref())?;

    let http_probe = if cfg.probe.enabled {
        Some(HttpProbe::new(cfg.probe.timeout())?)
    } else {
        None
    };
    Ok(run_pipeline(cfg, &source, http_probe.as_ref().map(|p| p as &dyn StreamProbe)))
}

fn probe_records(records: &[ChannelRecord], probe: Option<&dyn StreamProbe>, stats: &mut RunStats) -> Vec<bool> {
    let Some(checker) = probe else {
        return vec![true; records.len()];
    };
    info!("probing {} channels", records.len());
    records.iter().map(|record| {
        let alive = checker.is_alive(&record.stream_url);
        if !alive {
            stats.skipped += 1;
            warn!("skipping unreachable channel: {}", record.name);
        }
        alive
    }).collect()
}

fn write_channels<'a>(cfg: &Config, records: &'a [ChannelRecord], alive: &[bool], timestamp: &str, stats: &mut RunStats) -> Vec<&'a ChannelRecord> {
    let channels_path = cfg.channels_path();
    if let Err(err) = prepare_channel_dir(&channels_path, cfg.channels.clean) {
        error!("cant prepare channel directory {channels_path:?}: {err}");
        stats.step_errors += 1;
        return vec![];
    }
    let mut written = Vec::with_capacity(records.len());
    for (record, is_alive) in records.iter().zip(alive) {
        if !is_alive && !cfg.probe.write_unreachable {
            continue;
        }
        match write_channel(&channels_path, record, timestamp) {
            Ok(_) => {
                stats.written += 1;
                written.push(record);
            }
            Err(err) => {
                stats.failed += 1;
                error!("cant write channel {}: {err}", record.name);
            }
        }
    }
    info!("{} channel files written to {channels_path:?}", stats.written);
    written
}

/// Runs parse, probe, channel files, aggregates and html index on the fetched text.
/// Failing steps are logged and counted, the remaining steps still run.
pub fn run_pipeline(cfg: &Config, source: &str, probe: Option<&dyn StreamProbe>) -> RunStats {
    let mut stats = RunStats::default();
    let timestamp = cfg.timestamp.now();
    let mut step = StepMeasure::new("parsing playlist");

    let mut records = vec![];
    consume_m3u(source.lines(), |record| records.push(record));
    stats.parsed = records.len();
    info!("{} channels parsed", stats.parsed);

    step.tick("probing channels");
    let alive = probe_records(&records, probe, &mut stats);

    step.tick("writing channels");
    let written = write_channels(cfg, &records, &alive, &timestamp, &mut stats);

    step.tick("writing aggregates");
    let included: Vec<&ChannelRecord> = records.iter().zip(&alive).filter(|(_, is_alive)| **is_alive).map(|(r, _)| r).collect();
    stats.included = included.len();
    for aggregate in &cfg.aggregates {
        match write_aggregate(cfg, aggregate, source, &included, &timestamp) {
            Ok(path) => info!("{} playlist written: {path:?}", aggregate.kind),
            Err(err) => {
                stats.step_errors += 1;
                error!("{err}");
            }
        }
    }

    if let Some(html) = cfg.html() {
        step.tick("writing html index");
        let html_records: Vec<ChannelRecord> = written.into_iter().cloned().collect();
        match write_html_index(cfg, html, &html_records, &timestamp) {
            Ok(path) => info!("html index written: {path:?}"),
            Err(err) => {
                stats.step_errors += 1;
                error!("{err}");
            }
        }
    }
    (stats.steps, stats.duration) = step.stop();

    info!("playlist update finished - {stats}");
    stats
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use crate::model::{AggregateConfig, AggregateKind, Config, HtmlConfig, HtmlMode};
    use crate::processing::playlist_processor::{process_playlist, run_pipeline};
    use crate::repository::channel_repository::read_channel_block;
    use crate::utils::network::probe::StreamProbe;

    const SOURCE: &str = "#EXTM3U\n\
        #EXTINF:-1 tvg-logo=\"http://x/l.png\" group-title=\"News\",News 24\n\
        http://stream/a.m3u8\n\
        #EXTINF:-1,Orphan Channel\n\
        #EXTINF:-1 group-title=\"Music\",Dead Channel\n\
        http://dead/b.m3u8\n\
        #EXTINF:-1,Sports HD\n\
        #EXTVLCOPT:http-user-agent=Mozilla\n\
        https://stream/c.m3u8\n";

    struct FakeProbe;

    impl StreamProbe for FakeProbe {
        fn is_alive(&self, url: &str) -> bool {
            !url.contains("dead")
        }
    }

    fn create_config(dir: &Path, html_mode: Option<HtmlMode>) -> Config {
        let mut cfg = Config {
            working_dir: dir.to_str().unwrap().to_string(),
            aggregates: vec![
                AggregateConfig { kind: AggregateKind::Clone, filename: "clone.m3u".to_string(), base_url: None, comment: None, footer: vec![] },
                AggregateConfig { kind: AggregateKind::Index, filename: "index.m3u".to_string(), base_url: Some("https://cdn/channels".to_string()), comment: None, footer: vec![] },
                AggregateConfig { kind: AggregateKind::Mirror, filename: "mirror.m3u".to_string(), base_url: None, comment: Some("generated".to_string()), footer: vec!["end".to_string()] },
            ],
            html: html_mode.map(|mode| HtmlConfig { mode, ..HtmlConfig::default() }),
            ..Config::default()
        };
        cfg.prepare().unwrap();
        cfg
    }

    #[test]
    fn test_pipeline_without_probe() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = create_config(dir.path(), Some(HtmlMode::Full));
        let stats = run_pipeline(&cfg, SOURCE, None);

        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.written, 3);
        assert_eq!(stats.included, 3);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.step_errors, 0);
        assert_eq!(stats.steps, 5);

        let channels = dir.path().join("channels");
        let block = read_channel_block(&channels.join("Sports_HD.m3u8")).unwrap();
        assert_eq!(block, "#EXTINF:-1,Sports HD\n#EXTVLCOPT:http-user-agent=Mozilla\nhttps://stream/c.m3u8");
        assert_eq!(fs::read_to_string(dir.path().join("clone.m3u")).unwrap(), SOURCE);
        assert_eq!(fs::read_to_string(dir.path().join("index.m3u")).unwrap().lines().count(), 7);
        assert!(fs::read_to_string(dir.path().join("mirror.m3u")).unwrap().ends_with("# end\n"));

        let page = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(page.contains("<a href=\"channels/News_24.m3u8\">News 24</a>"));
        assert!(page.contains("<img src=\"http://x/l.png\""));
    }

    #[test]
    fn test_pipeline_with_probe() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = create_config(dir.path(), None);
        cfg.probe.enabled = true;
        cfg.probe.write_unreachable = false;
        let stats = run_pipeline(&cfg, SOURCE, Some(&FakeProbe));

        assert_eq!(stats.parsed, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.included, 2);
        assert_eq!(stats.written, 2);
        assert!(!dir.path().join("channels").join("Dead_Channel.m3u8").exists());

        let index = fs::read_to_string(dir.path().join("index.m3u")).unwrap();
        assert_eq!(index.lines().count(), 2 * stats.included + 1);
        assert!(!index.contains("Dead Channel"));
        assert!(index.contains("https://cdn/channels/News_24.m3u8"));

        cfg.probe.write_unreachable = true;
        let stats = run_pipeline(&cfg, SOURCE, Some(&FakeProbe));
        assert_eq!(stats.written, 3);
        assert_eq!(stats.included, 2);
        assert!(dir.path().join("channels").join("Dead_Channel.m3u8").exists());
    }

    #[test]
    fn test_template_step_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = create_config(dir.path(), Some(HtmlMode::Template));
        let stats = run_pipeline(&cfg, SOURCE, None);
        assert_eq!(stats.step_errors, 1);
        assert_eq!(stats.written, 3);
        assert!(dir.path().join("index.m3u").exists());
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = create_config(dir.path(), None);
        assert!(process_playlist(&cfg, Some("missing.m3u")).is_err());
        assert!(!dir.path().join("channels").exists());

        fs::write(dir.path().join("Master.m3u"), SOURCE).unwrap();
        let stats = process_playlist(&cfg, Some("Master.m3u")).unwrap();
        assert_eq!(stats.written, 3);
    }
}
