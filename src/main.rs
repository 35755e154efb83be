//! Interactive terminal form
//!
//! Usage: `simple-form-state [DECLARATIONS.json] [OPTIONS.json]`
//!
//! Without arguments a built-in sign-up form is shown. Every successful
//! submit is printed to stdout as JSON once the terminal is restored.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use regex::Regex;
use simple_form_state::{
    ui::{self, KeyOutcome, TerminalDriver},
    FieldDeclarations, FormConfig, FormHook, FormOptions, SelectValidationRules,
    TextValidationRules,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simple_form_state=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let (declarations, choices) = match args.next() {
        Some(path) => (
            FieldDeclarations::load(&path)
                .with_context(|| format!("Failed to load declarations from {}", path.display()))?,
            Vec::new(),
        ),
        None => sample_form()?,
    };
    let options = match args.next() {
        Some(path) => FormOptions::load(&path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => FormOptions::default(),
    };

    let submitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&submitted);
    let config = FormConfig::new().on_submit(move |state| match serde_json::to_string(state) {
        Ok(json) => sink.lock().push(json),
        Err(err) => tracing::warn!("Failed to serialize submitted form: {err}"),
    });

    let mut driver = TerminalDriver::new(&declarations);
    for (field, values) in choices {
        driver = driver.with_choices(field, values);
    }
    let hook = FormHook::new(declarations, config, options);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_form(&mut terminal, &hook, &mut driver);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    for json in submitted.lock().iter() {
        println!("{json}");
    }
    Ok(())
}

fn run_form<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    hook: &FormHook,
    driver: &mut TerminalDriver,
) -> Result<()> {
    driver.start(&hook.render());

    loop {
        let output = hook.render();
        terminal.draw(|frame| ui::draw_form(frame, frame.area(), &output, driver.focus()))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            match driver.handle_key(&output, key) {
                KeyOutcome::Submitted(outcome) => tracing::info!("Submit: {outcome:?}"),
                KeyOutcome::Reset => tracing::info!("Form reset"),
                _ => {}
            }
        }
    }
}

type Choices = Vec<(&'static str, Vec<String>)>;

fn sample_form() -> Result<(FieldDeclarations, Choices)> {
    let declarations = FieldDeclarations::new()
        .text(
            "email",
            TextValidationRules::new()
                .required()
                .pattern(Regex::new(r"^[^@\s]+@[^@\s]+$")?),
        )
        .password("password", TextValidationRules::new().required().min_length(8))
        .text("age", TextValidationRules::new().numeric().max_length(3))
        .select("plan", SelectValidationRules::new().required())
        .checkbox("newsletter");

    let plans = ["free", "team", "enterprise"].map(String::from).to_vec();
    Ok((declarations, vec![("plan", plans)]))
}
