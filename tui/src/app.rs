//! Main Application
//!
//! The App struct manages the TUI lifecycle:
//! - Event loop (keyboard, mouse, resize) and the frame ticker
//! - [`PromptForm`] + [`Submitter`] for the question/answer half
//! - [`RotationDriver`] for the cube, fed by frame deltas and mouse hits
//!
//! Every frame advances the driver, collects finished responses, and
//! redraws all layers through the compositor.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, StatefulWidget, Widget};
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;

use gem3d_core::{Gem3dConfig, RotationDriver, Transport};

use crate::compositor::{Compositor, LayerId};
use crate::form::{PromptForm, INPUT_PLACEHOLDER, TITLE};
use crate::layout::AppLayout;
use crate::scene::CubeView;
use crate::submission::Submitter;
use crate::theme;
use crate::widgets::{TextBlock, TextBlockState};

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: isize = 3;

/// Main application state
pub struct App<T: Transport + 'static> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Time per frame
    frame_duration: Duration,
    /// Shown in the status bar
    model: String,

    // === Prompt ===
    form: PromptForm,
    submitter: Submitter<T>,
    /// Response scroll position
    response_scroll: TextBlockState,

    // === Scene ===
    driver: RotationDriver,
    /// Cube footprint in scene-layer coordinates, from the last render
    cube_footprint: Option<Rect>,
    /// Button area in input-layer coordinates, from the last render
    button_area: Option<Rect>,

    // === UI Components ===
    compositor: Compositor,
    layers: AppLayers,
    layout: AppLayout,

    /// Last frame time (for rotation)
    last_frame: Instant,
}

/// Layer IDs for UI regions
struct AppLayers {
    header: LayerId,
    input: LayerId,
    response: LayerId,
    scene: LayerId,
    status: LayerId,
}

impl<T: Transport + 'static> App<T> {
    /// Create a new App covering `area`
    pub fn new(config: &Gem3dConfig, submitter: Submitter<T>, area: Rect) -> Self {
        let layout = AppLayout::compute(area);
        let mut compositor = Compositor::new(area);

        let layers = AppLayers {
            scene: compositor.create_layer(layout.scene, 0),
            header: compositor.create_layer(layout.header, 10),
            input: compositor.create_layer(layout.input, 10),
            response: compositor.create_layer(layout.response, 10),
            status: compositor.create_layer(layout.status, 20),
        };

        Self {
            running: true,
            frame_duration: config.frame_duration(),
            model: config.model.clone(),
            form: PromptForm::new(),
            submitter,
            response_scroll: TextBlockState::default(),
            driver: RotationDriver::new(),
            cube_footprint: None,
            button_area: None,
            compositor,
            layers,
            layout,
            last_frame: Instant::now(),
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = tokio::time::interval(self.frame_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                // Frame tick - advance and render
                _ = ticker.tick() => {
                    self.tick();
                    self.draw(terminal)?;
                }
            }
        }

        tracing::info!("Exiting");
        Ok(())
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Prompt form state
    pub fn form(&self) -> &PromptForm {
        &self.form
    }

    /// Cube state
    pub fn driver(&self) -> &RotationDriver {
        &self.driver
    }

    /// Cube footprint in screen coordinates, from the last draw
    pub fn cube_footprint(&self) -> Option<Rect> {
        let scene = self.compositor.layer(self.layers.scene)?;
        self.cube_footprint
            .map(|r| Rect::new(r.x + scene.bounds.x, r.y + scene.bounds.y, r.width, r.height))
    }

    /// Ask button in screen coordinates, from the last draw
    pub fn button_area(&self) -> Option<Rect> {
        let input = self.compositor.layer(self.layers.input)?;
        self.button_area
            .map(|r| Rect::new(r.x + input.bounds.x, r.y + input.bounds.y, r.width, r.height))
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Advance one frame: rotate the cube and collect finished responses
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        self.driver.on_frame_duration(delta);

        if let Some(text) = self.submitter.poll() {
            self.form.complete(text);
            self.response_scroll.scroll_to_top();
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            KeyCode::Enter => self.submit(),

            // Typing
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.push_char(c);
            }
            KeyCode::Backspace => self.form.backspace(),

            // Response scrolling
            KeyCode::PageUp => {
                let page = self.page_size();
                self.response_scroll.scroll(-page);
            }
            KeyCode::PageDown => {
                let page = self.page_size();
                self.response_scroll.scroll(page);
            }

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.update_hover(col, row),
            MouseEventKind::Down(MouseButton::Left) => {
                self.update_hover(col, row);
                if self.hits_cube(col, row) {
                    self.driver.click();
                    tracing::debug!(active = self.driver.interaction().active, "Cube clicked");
                } else if self.hits_button(col, row) {
                    self.submit();
                }
            }
            MouseEventKind::ScrollUp => self.response_scroll.scroll(-WHEEL_LINES),
            MouseEventKind::ScrollDown => self.response_scroll.scroll(WHEEL_LINES),
            _ => {}
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        self.layout = AppLayout::compute(area);
        self.compositor.resize(area);

        self.compositor.set_bounds(self.layers.header, self.layout.header);
        self.compositor.set_bounds(self.layers.input, self.layout.input);
        self.compositor.set_bounds(self.layers.response, self.layout.response);
        self.compositor.set_bounds(self.layers.scene, self.layout.scene);
        self.compositor.set_bounds(self.layers.status, self.layout.status);

        // Stale until the next render
        self.cube_footprint = None;
        self.button_area = None;
    }

    fn submit(&mut self) {
        if let Some(prompt) = self.form.begin_submit() {
            self.submitter.submit(prompt);
        }
    }

    fn page_size(&self) -> isize {
        isize::try_from(self.layout.response.height.saturating_sub(1).max(1)).unwrap_or(1)
    }

    /// Send enter/leave to the driver when the pointer crosses the cube edge
    fn update_hover(&mut self, col: u16, row: u16) {
        let inside = self.hits_cube(col, row);
        match (inside, self.driver.interaction().hovered) {
            (true, false) => self.driver.pointer_enter(),
            (false, true) => self.driver.pointer_leave(),
            _ => return,
        }
        tracing::trace!(tint = self.driver.tint().name(), "Cube hover changed");
    }

    fn hits_cube(&self, col: u16, row: u16) -> bool {
        self.hits_layer_rect(self.layers.scene, self.cube_footprint, col, row)
    }

    fn hits_button(&self, col: u16, row: u16) -> bool {
        self.hits_layer_rect(self.layers.input, self.button_area, col, row)
    }

    /// Whether the topmost layer at a cell is `id` and the cell lies in `rect`
    fn hits_layer_rect(&self, id: LayerId, rect: Option<Rect>, col: u16, row: u16) -> bool {
        if self.compositor.layer_at(col, row) != Some(id) {
            return false;
        }
        let (Some(rect), Some(layer)) = (rect, self.compositor.layer(id)) else {
            return false;
        };
        layer.to_local(col, row).is_some_and(|(x, y)| {
            x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
        })
    }

    /// Render the UI
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.render_scene();
        self.render_header();
        self.render_input();
        self.render_response();
        self.render_status();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let Some(cell) = output.content.get(output.index_of(x, y)) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Render the scene layer: rounded frame with the cube inside
    fn render_scene(&mut self) {
        let projection = self.driver.projection();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.scene) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        if area.width < 4 || area.height < 3 {
            self.cube_footprint = None;
            return;
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::SCENE_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        let cube = CubeView::new(projection, inner);
        (&cube).render(inner, buf);
        self.cube_footprint = cube.footprint();
    }

    /// Render the title row
    fn render_header(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) {
            buf.reset();
            let area = buf.area;
            if area.is_empty() {
                return;
            }
            let width = u16::try_from(TITLE.len()).unwrap_or(area.width);
            let x = area.x + area.width.saturating_sub(width) / 2;
            buf.set_string(
                x,
                area.y,
                TITLE,
                Style::default().fg(theme::TITLE).add_modifier(Modifier::BOLD),
            );
        }
    }

    /// Render the prompt row: input on the left, button on the right
    fn render_input(&mut self) {
        let label = format!("[ {} ]", self.form.button_label());
        let button_style = if self.form.can_submit() {
            Style::default()
                .fg(theme::BUTTON_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::DIM_GRAY)
        };

        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.input) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        let button_width = u16::try_from(label.chars().count()).unwrap_or(area.width);
        if area.width <= button_width + 4 || area.height == 0 {
            self.button_area = None;
            return;
        }

        let field_width = (area.width - button_width - 1) as usize;
        let (text, style) = if self.form.input().is_empty() {
            (INPUT_PLACEHOLDER.to_string(), Style::default().fg(theme::DIM_GRAY))
        } else {
            let cursor = if self.form.is_loading() { "" } else { "_" };
            (
                format!("> {}{cursor}", self.form.input()),
                Style::default().fg(theme::INPUT_TEXT),
            )
        };

        // Keep the end of a long prompt visible
        let chars: Vec<char> = text.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(field_width)..]
            .iter()
            .collect();
        buf.set_string(area.x, area.y, &visible, style);

        let button_x = area.x + area.width - button_width;
        buf.set_string(button_x, area.y, &label, button_style);
        self.button_area = Some(Rect::new(button_x, area.y, button_width, 1));
    }

    /// Render the response text block
    fn render_response(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.response) {
            buf.reset();
            let area = buf.area;
            TextBlock::new(self.form.response_text())
                .style(Style::default().fg(theme::RESPONSE_TEXT))
                .render(area, buf, &mut self.response_scroll);
        }
    }

    /// Render status bar
    fn render_status(&mut self) {
        let state = if self.form.is_loading() {
            "thinking"
        } else {
            "ready"
        };
        let key_note = if self.submitter.has_api_key() {
            ""
        } else {
            " | no API key"
        };
        let status = format!(
            " {} | {state}{key_note} | Enter ask | click the cube | PgUp/PgDn scroll | Esc quit",
            self.model
        );

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            if !area.is_empty() {
                buf.set_string(area.x, area.y, &status, Style::default().fg(theme::STATUS));
            }
        }
    }
}
