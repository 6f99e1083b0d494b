use std::io::Read;
use std::sync::Arc;
use std::{fs, io};

use anyhow::{Context, Result};
use ip_hold::config::Config;
use ip_hold::http::HttpInventory;
use ip_hold::report::{render_form, render_options, render_transition, SessionStep};
use ip_hold::script::{parse_script, FormEvent};
use ip_hold_core::select::SelectOption;
use ip_hold_core::{Ack, CollectingNotifier, HostForm, HostFormPage, IpId, SelectWidget};
use tracing::warn;

use crate::cli::{OutputFormat, SessionArgs};

pub async fn run_session(args: SessionArgs, config: &Config) -> Result<()> {
    let raw = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read script from stdin")?;
            buf
        }
    };
    let events = parse_script(&raw).context("invalid session script")?;

    let api = Arc::new(HttpInventory::new(config));
    let notifier = Arc::new(CollectingNotifier::new());
    let form = HostForm::prefilled(&args.vlan, initial_ip_select(args.ip.as_deref()), args.manual);
    let mut page = HostFormPage::new(form, api.clone(), notifier.clone(), config.hold_policy);
    let mut out = StepWriter::new(args.format, notifier);

    page.on_load().await;
    out.step("load", None, None, &page, true)?;

    for event in events {
        let label = event.to_string();
        match event {
            FormEvent::Vlan(vlan) => {
                page.on_parent_change(&vlan).await;
                out.step(&label, None, None, &page, true)?;
            }
            FormEvent::Ip(value) => {
                let (detail, ack) = match page.on_ip_change(&value).await {
                    Some(transition) => (
                        render_transition(&transition),
                        transition.reserve_ack().cloned(),
                    ),
                    None => {
                        warn!(value = %value, "no such option in the IP selector");
                        ("no such option".to_string(), None)
                    }
                };
                out.step(&label, Some(detail), ack, &page, false)?;
            }
            FormEvent::Manual(checked) => {
                page.on_manual_toggle(checked);
                out.step(&label, None, None, &page, false)?;
            }
            FormEvent::Unload => {
                let detail = unload_detail(page.on_unload());
                out.step(&label, Some(detail), None, &page, false)?;
            }
        }
    }

    if !page.session().is_unloaded() {
        let detail = unload_detail(page.on_unload());
        out.step("unload", Some(detail), None, &page, false)?;
    }
    api.settle(config.beacon_grace()).await;

    out.finish()
}

/// The IP selector as the server renders it: the bound address, if any, is the
/// only option besides the placeholder until the lookup repopulates it.
fn initial_ip_select(ip: Option<&str>) -> SelectWidget {
    let mut options = vec![SelectOption::placeholder()];
    if let Some(id) = ip.and_then(IpId::parse) {
        options.push(SelectOption {
            value: id.to_string(),
            label: id.to_string(),
            selected: true,
        });
    }
    SelectWidget::new(options)
}

fn unload_detail(released: Option<IpId>) -> String {
    match released {
        Some(ip) => format!("beacon release ip={ip}"),
        None => "nothing held".to_string(),
    }
}

struct StepWriter {
    format: OutputFormat,
    notifier: Arc<CollectingNotifier>,
    seen_alerts: usize,
    steps: Vec<serde_json::Value>,
}

impl StepWriter {
    fn new(format: OutputFormat, notifier: Arc<CollectingNotifier>) -> Self {
        Self {
            format,
            notifier,
            seen_alerts: 0,
            steps: Vec::new(),
        }
    }

    fn step(
        &mut self,
        event: &str,
        detail: Option<String>,
        reserve: Option<Ack>,
        page: &HostFormPage,
        show_options: bool,
    ) -> Result<()> {
        let alerts = self.notifier.alerts();
        let fresh: Vec<String> = alerts.iter().skip(self.seen_alerts).cloned().collect();
        self.seen_alerts = alerts.len();

        match self.format {
            OutputFormat::Text => {
                println!("==> {event}");
                if let Some(detail) = &detail {
                    println!("    {detail}");
                }
                for alert in &fresh {
                    println!("    ALERT {alert}");
                }
                if show_options {
                    for line in render_options(&page.form().ip_select).lines() {
                        println!("    {line}");
                    }
                }
                println!("    {}", render_form(page.form(), &page.session_state()));
            }
            OutputFormat::Json => {
                let step = SessionStep {
                    event: event.to_string(),
                    detail,
                    reserve,
                    form: page.form(),
                    session: page.session_state(),
                    alerts: fresh,
                };
                self.steps.push(serde_json::to_value(&step)?);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if let OutputFormat::Json = self.format {
            println!("{}", serde_json::to_string_pretty(&self.steps)?);
        }
        Ok(())
    }
}
