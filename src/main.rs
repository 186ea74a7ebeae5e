//! Demo: scrollspy over a rendered terminal document.
//!
//! Renders a multi-section document next to a nav sidebar and drives a
//! [`Scrollspy`] instance from terminal events: wheel/keys scroll the
//! document (throttled), resizes reclassify after a debounce, and the
//! number keys activate nav links with an ease-out smooth scroll.
//!
//! Keys: j/k or arrows scroll, PgUp/PgDn page, g/G jump, number keys
//! navigate to a section, 0 scroll to top, r refresh, q quit.

use std::collections::HashSet;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Gauge, Paragraph};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollspy::error::DocumentResult;
use scrollspy::{Document, Options, Rect, ScrollBehavior, Scrollspy};

const LISTENER_ATTR: &str = "data-scrollspy";
const TICK: Duration = Duration::from_millis(30);

/// A document node the demo hands to the scrollspy core.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DemoElement {
    /// Section heading, addressable by anchor id.
    Section(usize),
    /// Sidebar link to a section.
    Nav(usize),
    /// Sidebar link to the top of the document (`href="#"`).
    TopNav,
}

#[derive(Debug)]
struct Section {
    id: String,
    title: String,
    /// Absolute row of the heading.
    top: f64,
    /// Rows from heading to the end of the body.
    height: f64,
}

/// Terminal-rendered document implementing the host seam: rows stand in
/// for pixels, sidebar links for anchors, and a decaying displacement
/// for the browser's animated scroll.
#[derive(Debug)]
struct DemoDocument {
    sections: Vec<Section>,
    lines: Vec<String>,
    scroll: f64,
    viewport_rows: f64,
    /// Nav indices currently carrying the active marker.
    current: HashSet<usize>,
    fragment: Option<String>,
    focused: Option<usize>,
    focus_ready: HashSet<usize>,
    /// Ease-out animation target, if a smooth scroll is in flight.
    anim_target: Option<f64>,
}

impl DemoDocument {
    fn new() -> Self {
        let titles = [
            ("overview", "Overview"),
            ("install", "Installation"),
            ("configuration", "Configuration"),
            ("usage", "Usage"),
            ("internals", "Internals"),
            ("faq", "FAQ"),
        ];

        let mut sections = Vec::new();
        let mut lines: Vec<String> = Vec::new();
        for (i, (id, title)) in titles.iter().enumerate() {
            let top = lines.len() as f64;
            lines.push(format!("# {title}"));
            lines.push(String::new());
            let body_rows = 14 + (i * 3) % 9;
            for row in 0..body_rows {
                lines.push(format!(
                    "{title} — paragraph {p}, line {l}. Scroll past the heading to see \
                     the sidebar marker move.",
                    p = row / 4 + 1,
                    l = row % 4 + 1,
                ));
            }
            lines.push(String::new());
            sections.push(Section {
                id: id.to_string(),
                title: title.to_string(),
                top,
                height: (lines.len() as f64) - top,
            });
        }

        Self {
            sections,
            lines,
            scroll: 0.0,
            viewport_rows: 24.0,
            current: HashSet::new(),
            fragment: None,
            focused: None,
            focus_ready: HashSet::new(),
            anim_target: None,
        }
    }

    fn set_viewport_rows(&mut self, rows: f64) {
        self.viewport_rows = rows.max(1.0);
        self.clamp_scroll();
    }

    /// User-driven scroll. Cancels any animation in flight.
    fn scroll_by(&mut self, delta: f64) {
        self.anim_target = None;
        self.scroll += delta;
        self.clamp_scroll();
    }

    fn scroll_to_row(&mut self, row: f64) {
        self.anim_target = None;
        self.scroll = row;
        self.clamp_scroll();
    }

    /// Advance the ease-out animation one frame. Returns true while the
    /// viewport is still moving.
    fn tick_animation(&mut self) -> bool {
        let Some(target) = self.anim_target else {
            return false;
        };
        let diff = target - self.scroll;
        if diff.abs() < 0.5 {
            self.scroll = target;
            self.anim_target = None;
        } else {
            self.scroll += diff * 0.35;
        }
        self.clamp_scroll();
        true
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    fn is_current(&self, nav: usize) -> bool {
        self.current.contains(&nav)
    }
}

impl Document for DemoDocument {
    type Element = DemoElement;

    fn elements_with_attribute(&self, attribute: &str) -> Vec<DemoElement> {
        if attribute != LISTENER_ATTR {
            return Vec::new();
        }
        let mut els: Vec<DemoElement> = (0..self.sections.len()).map(DemoElement::Nav).collect();
        els.push(DemoElement::TopNav);
        els
    }

    fn element_by_id(&self, id: &str) -> Option<DemoElement> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .map(DemoElement::Section)
    }

    fn attribute(&self, el: &DemoElement, name: &str) -> Option<String> {
        match (el, name) {
            (DemoElement::Nav(i), "href") => Some(format!("#{}", self.sections[*i].id)),
            (DemoElement::TopNav, "href") => Some("#".to_string()),
            (DemoElement::Nav(_) | DemoElement::TopNav, n) if n == LISTENER_ATTR => {
                Some(String::new())
            }
            _ => None,
        }
    }

    fn bounding_rect(&self, el: &DemoElement) -> Rect {
        match el {
            DemoElement::Section(i) => {
                let s = &self.sections[*i];
                Rect::new(s.top - self.scroll, s.top + s.height - self.scroll)
            }
            // Sidebar links live outside the scrolled document.
            _ => Rect::new(0.0, 1.0),
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_rows
    }

    fn document_height(&self) -> f64 {
        self.lines.len() as f64
    }

    fn set_marker(&mut self, el: &DemoElement, _name: &str) {
        if let DemoElement::Nav(i) = el {
            self.current.insert(*i);
        }
    }

    fn remove_marker(&mut self, el: &DemoElement, _name: &str) {
        if let DemoElement::Nav(i) = el {
            self.current.remove(i);
        }
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) -> DocumentResult<()> {
        let offset = offset.clamp(0.0, self.max_scroll());
        match behavior {
            ScrollBehavior::Smooth => self.anim_target = Some(offset),
            ScrollBehavior::Instant => {
                self.anim_target = None;
                self.scroll = offset;
            }
        }
        Ok(())
    }

    fn supports_smooth_scroll(&self) -> DocumentResult<bool> {
        Ok(true)
    }

    fn replace_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(str::to_string);
    }

    fn focus(&mut self, el: &DemoElement) -> bool {
        match el {
            DemoElement::Section(i) if self.focus_ready.contains(i) => {
                self.focused = Some(*i);
                true
            }
            _ => false,
        }
    }

    fn make_focusable(&mut self, el: &DemoElement) {
        if let DemoElement::Section(i) = el {
            self.focus_ready.insert(*i);
        }
    }
}

/// Load options from a config file, falling back to defaults.
///
/// Looks at `~/.config/scrollspy/config.toml` first, then `./scrollspy.toml`.
fn load_options() -> Options {
    let candidates = [
        dirs::config_dir().map(|d| d.join("scrollspy").join("config.toml")),
        Some(PathBuf::from("scrollspy.toml")),
    ];

    for path in candidates.into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(options) => return options,
                Err(e) => {
                    eprintln!("Warning: failed to parse {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                eprintln!("Warning: failed to read {}: {}", path.display(), e);
            }
        }
    }
    Options::default()
}

/// Log to a file so output does not corrupt the alternate screen.
fn init_tracing() -> Option<PathBuf> {
    let dir = dirs::state_dir().or_else(dirs::cache_dir)?.join("scrollspy");
    std::fs::create_dir_all(&dir).ok()?;
    let path = dir.join("demo.log");
    let file = std::fs::File::create(&path).ok()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();
    Some(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_path = init_tracing();
    let options = load_options();

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut spy = Scrollspy::new(DemoDocument::new(), options);
    spy.on_update(|state| {
        tracing::debug!(
            position = state.position,
            status = state.status,
            active = ?state.active,
            "update",
        );
    });
    spy.on_click(|target| {
        tracing::info!(?target, "nav activated");
    });

    let result = run_app(&mut terminal, &mut spy).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    spy: &mut Scrollspy<DemoDocument>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        let size = terminal.size()?;
        // Content area: full height minus gauge and footer rows.
        spy.document_mut()
            .set_viewport_rows(size.height.saturating_sub(2) as f64);

        terminal.draw(|frame| render(frame, spy))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                let Some(Ok(event)) = maybe_event else { continue };
                let now = Instant::now();

                if let Event::Mouse(mouse) = &event {
                    match mouse.kind {
                        MouseEventKind::ScrollUp => {
                            spy.document_mut().scroll_by(-3.0);
                            spy.handle_scroll(now);
                        }
                        MouseEventKind::ScrollDown => {
                            spy.document_mut().scroll_by(3.0);
                            spy.handle_scroll(now);
                        }
                        _ => {}
                    }
                    continue;
                }

                if let Event::Resize(_, _) = event {
                    spy.handle_resize(now);
                    continue;
                }

                let Event::Key(key) = event else { continue };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let page = spy.document().viewport_height() - 2.0;
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('j') | KeyCode::Down => {
                        spy.document_mut().scroll_by(1.0);
                        spy.handle_scroll(now);
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        spy.document_mut().scroll_by(-1.0);
                        spy.handle_scroll(now);
                    }
                    KeyCode::PageDown => {
                        spy.document_mut().scroll_by(page);
                        spy.handle_scroll(now);
                    }
                    KeyCode::PageUp => {
                        spy.document_mut().scroll_by(-page);
                        spy.handle_scroll(now);
                    }
                    KeyCode::Char('g') | KeyCode::Home => {
                        spy.document_mut().scroll_to_row(0.0);
                        spy.handle_scroll(now);
                    }
                    KeyCode::Char('G') | KeyCode::End => {
                        let max = spy.document().max_scroll();
                        spy.document_mut().scroll_to_row(max);
                        spy.handle_scroll(now);
                    }
                    KeyCode::Char('0') => {
                        spy.handle_click(&DemoElement::TopNav);
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let i = (c as usize) - ('1' as usize);
                        if i < spy.document().sections.len() {
                            spy.handle_click(&DemoElement::Nav(i));
                        }
                    }
                    KeyCode::Char('r') => spy.refresh(),
                    _ => {}
                }
            }

            // Frame tick: drive the smooth-scroll animation and any
            // deferred throttled/debounced passes.
            _ = tokio::time::sleep(TICK) => {
                let now = Instant::now();
                if spy.document_mut().tick_animation() {
                    spy.handle_scroll(now);
                }
                spy.tick(now);
            }
        }
    }
}

fn render(frame: &mut Frame, spy: &Scrollspy<DemoDocument>) {
    let main_layout = Layout::vertical([
        Constraint::Min(0),    // Sidebar + document
        Constraint::Length(1), // Progress gauge
        Constraint::Length(1), // Hotkeys
    ])
    .split(frame.area());

    let content_layout = Layout::horizontal([
        Constraint::Length(24), // Nav sidebar
        Constraint::Min(0),     // Document
    ])
    .split(main_layout[0]);

    let doc = spy.document();

    let mut nav_lines: Vec<Line> = vec![
        Line::from(Span::styled(" top (0)", Style::new().fg(Color::DarkGray))),
        Line::from(""),
    ];
    for (i, section) in doc.sections.iter().enumerate() {
        let label = format!(" {} ({})", section.title, i + 1);
        let style = if doc.is_current(i) {
            Style::new().fg(Color::Yellow).bold()
        } else {
            Style::new()
        };
        nav_lines.push(Line::from(Span::styled(label, style)));
    }
    frame.render_widget(
        Paragraph::new(nav_lines).block(Block::bordered().title(" sections ")),
        content_layout[0],
    );

    let text: Vec<Line> = doc.lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(
        Paragraph::new(text).scroll((doc.scroll_offset() as u16, 0)),
        content_layout[1],
    );

    frame.render_widget(
        Gauge::default()
            .ratio(spy.status() / 100.0)
            .label(format!("{:.0}%", spy.status())),
        main_layout[1],
    );

    let fragment = doc
        .fragment
        .as_deref()
        .map(|f| format!("#{f}"))
        .unwrap_or_default();
    let focus = doc
        .focused
        .map(|i| format!("focus: {}", doc.sections[i].id))
        .unwrap_or_default();
    let hotkeys = format!(
        " row {:.0}  {}  {}  ·  1-{} navigate · 0 top · r refresh · q quit",
        spy.position(),
        fragment,
        focus,
        doc.sections.len(),
    );
    frame.render_widget(
        Paragraph::new(Span::styled(hotkeys, Style::new().fg(Color::DarkGray))),
        main_layout[2],
    );
}
