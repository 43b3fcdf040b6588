//! Save command handler
//!
//! Runs one synchronization cycle on the submitted settings.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;

use smt_sync::config::AppConfig;
use smt_sync::domain::ports::{FanoutEventSink, SyncEventSink};
use smt_sync::infrastructure::{JsonEventSink, TracingEventSink};
use smt_sync::presentation::output::render_sync_report;
use smt_sync::presentation::{factory, InputArgs};

use super::input;

/// Execute the save command
pub fn cmd_save(config: &AppConfig, args: &InputArgs, json: bool, events: bool) -> Result<ExitCode> {
    let store = factory::create_settings_repository(config);
    let raw = input::collect(args, &store)?;

    let sink: Arc<dyn SyncEventSink> = if events {
        Arc::new(FanoutEventSink::new(vec![
            Box::new(TracingEventSink),
            Box::new(JsonEventSink::stdout()),
        ]))
    } else {
        Arc::new(TracingEventSink)
    };

    let report = factory::create_sync_use_case(config, sink).execute(&raw);

    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", render_sync_report(&report));
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
