//! Desktop simulator for the tab-bar control
//!
//! Runs a `TabBar` inside an SDL2 window so layout, flicking and keyboard
//! focus can be tried without hardware.
//!
//! Controls:
//! - Mouse: tap tabs and arrows, drag the panes sideways in flick mode
//! - Arrow keys / Enter: keyboard focus
//! - F: give the control focus
//! - M: switch between paged and flick layout
//! - D: enable/disable the third tab
//! - B: move the strip to the top or bottom
//! - L: switch between the dark and light palette
//! - Escape: cancel the current gesture

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use log::{debug, info, warn};

use tabstrip::tabs::{FocusMode, LayoutMode, TabPosition};
use tabstrip::ui::TabPalette;
use tabstrip::{
    Drawable, FocusSignal, InputEvent, Key, MonoFontMetrics, PaneHandle, PaneSurface, TabBar,
    TabBarConfig, TouchPoint, Update,
};

const DISPLAY_WIDTH: u32 = 240;
const DISPLAY_HEIGHT: u32 = 160;
const WINDOW_SCALE: u32 = 3;
/// ~30 FPS
const FRAME_DURATION: Duration = Duration::from_millis(33);

const CAPTIONS: [&str; 7] = [
    "Overview", "Network", "Storage", "Sensors", "Logs", "Settings", "About",
];
const PANE_COLORS: [Rgb565; 4] = [
    Rgb565::new(4, 12, 8),
    Rgb565::new(8, 10, 4),
    Rgb565::new(4, 8, 12),
    Rgb565::new(10, 6, 10),
];
/// Focusable rows in each simulated pane
const PANE_ROWS: usize = 3;

type SimBar = TabBar<MonoFontMetrics, SimPanes, 8>;

#[derive(Debug)]
struct SimPane {
    tab: usize,
    bounds: Rectangle,
    attached: bool,
    focused_row: Option<usize>,
}

/// Panes owned by the simulator: a coloured block with a few rows that can
/// take keyboard focus
#[derive(Debug, Default)]
struct SimPanes {
    panes: Vec<SimPane>,
}

impl SimPanes {
    fn get_mut(&mut self, pane: PaneHandle) -> Option<&mut SimPane> {
        self.panes.get_mut(pane.0 as usize)
    }

    fn focused_mut(&mut self) -> Option<&mut SimPane> {
        self.panes.iter_mut().find(|p| p.focused_row.is_some())
    }

    fn clear_focus(&mut self) {
        for pane in &mut self.panes {
            pane.focused_row = None;
        }
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let text_style = MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE);
        let focus_style = MonoTextStyle::new(&FONT_6X10, Rgb565::YELLOW);

        for pane in self.panes.iter().filter(|p| p.attached) {
            pane.bounds
                .into_styled(PrimitiveStyle::with_fill(
                    PANE_COLORS[pane.tab % PANE_COLORS.len()],
                ))
                .draw(display)?;

            let origin = pane.bounds.top_left + Point::new(6, 6);
            let title = format!("{} pane", CAPTIONS[pane.tab]);
            Text::with_baseline(&title, origin, text_style, Baseline::Top).draw(display)?;

            for row in 0..PANE_ROWS {
                let style = if pane.focused_row == Some(row) {
                    focus_style
                } else {
                    text_style
                };
                let label = format!("[ item {} ]", row + 1);
                let at = origin + Point::new(4, 16 + row as i32 * 12);
                Text::with_baseline(&label, at, style, Baseline::Top).draw(display)?;
            }
        }
        Ok(())
    }
}

impl PaneSurface for SimPanes {
    fn create_pane(&mut self, tab: usize) -> PaneHandle {
        let handle = PaneHandle(self.panes.len() as u32);
        self.panes.push(SimPane {
            tab,
            bounds: Rectangle::zero(),
            attached: false,
            focused_row: None,
        });
        debug!("Created pane {:?} for tab {}", handle, tab);
        handle
    }

    fn attach(&mut self, pane: PaneHandle, bounds: Rectangle) {
        if let Some(p) = self.get_mut(pane) {
            p.bounds = bounds;
            p.attached = true;
        }
    }

    fn detach(&mut self, pane: PaneHandle) {
        if let Some(p) = self.get_mut(pane) {
            p.attached = false;
            p.focused_row = None;
        }
    }

    fn set_position(&mut self, pane: PaneHandle, position: Point) {
        if let Some(p) = self.get_mut(pane) {
            p.bounds.top_left = position;
        }
    }

    fn request_focus_first_child(&mut self, pane: PaneHandle, forward: bool) -> bool {
        self.clear_focus();
        match self.get_mut(pane) {
            Some(p) => {
                p.focused_row = Some(if forward { 0 } else { PANE_ROWS - 1 });
                true
            }
            None => false,
        }
    }
}

fn build_bar(config: TabBarConfig) -> Option<SimBar> {
    let mut bar = match SimBar::with_text(
        &CAPTIONS,
        MonoFontMetrics::default(),
        SimPanes::default(),
        config,
    ) {
        Ok(bar) => bar,
        Err(e) => {
            warn!("Failed to build tab bar: {}", e);
            return None;
        }
    };
    let _ = bar.set_bounds(Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
    ));
    if let Some(warning) = bar.layout_warning() {
        warn!("Layout warning: {:?}", warning);
    }
    info!(
        "Tab bar ready: {:?} mode, must scroll: {}",
        config.layout_mode,
        bar.must_scroll()
    );
    Some(bar)
}

/// Log what the control reported and say whether the frame needs a redraw
fn report(update: Update) -> bool {
    if let Some(changed) = update.changed {
        info!("Tab changed {} -> {}", changed.from, changed.to);
    }
    if update.feedback {
        debug!("Click feedback requested");
    }
    match update.focus {
        Some(FocusSignal::Delegated) => info!("Focus handed to the active pane"),
        Some(FocusSignal::Reclaimed) => info!("Focus back on the tab strip"),
        Some(FocusSignal::Released) => info!("Focus left the control"),
        None => {}
    }
    update.needs_redraw()
}

/// Arrow keys go to the focused pane first; Up/Down past its ends hand
/// focus back to the control
fn route_key(bar: &mut SimBar, key: Key) -> bool {
    if bar.focus_mode() == FocusMode::InsideContent
        && key.is_vertical()
        && let Some(pane) = bar.surface_mut().focused_mut()
        && let Some(row) = pane.focused_row
    {
        let next = match key {
            Key::Down => row.checked_add(1).filter(|&r| r < PANE_ROWS),
            _ => row.checked_sub(1),
        };
        return match next {
            Some(r) => {
                pane.focused_row = Some(r);
                true
            }
            None => {
                bar.surface_mut().clear_focus();
                report(bar.content_focus_exhausted())
            }
        };
    }
    report(bar.handle_event(InputEvent::KeySpecial(key)))
}

fn touch(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn main() {
    env_logger::init();

    info!("Starting tabstrip simulator");
    info!("Display: {}x{}", DISPLAY_WIDTH, DISPLAY_HEIGHT);

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("tabstrip simulator", &output_settings);

    let mut config = TabBarConfig::touch();
    let Some(mut bar) = build_bar(config) else {
        return;
    };

    let started = Instant::now();
    let mut last_pointer: Option<Point> = None;
    let mut needs_redraw = true;
    let mut light = false;

    // The window must be updated once before events can be polled
    window.update(&display);

    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    last_pointer = Some(point);
                    needs_redraw |= report(bar.handle_event(InputEvent::PointerDown(touch(point))));
                }
                SimulatorEvent::MouseMove { point } => {
                    if let Some(last) = last_pointer {
                        last_pointer = Some(point);
                        needs_redraw |= report(bar.handle_event(InputEvent::PointerDrag {
                            point: touch(point),
                            delta: point - last,
                            at_ms: started.elapsed().as_millis() as u64,
                        }));
                    }
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    last_pointer = None;
                    needs_redraw |= report(bar.handle_event(InputEvent::PointerUp(touch(point))));
                }
                SimulatorEvent::KeyDown { keycode, .. } => {
                    needs_redraw |= match keycode {
                        Keycode::Left => route_key(&mut bar, Key::Left),
                        Keycode::Right => route_key(&mut bar, Key::Right),
                        Keycode::Up => route_key(&mut bar, Key::Up),
                        Keycode::Down => route_key(&mut bar, Key::Down),
                        Keycode::Return => report(bar.handle_event(InputEvent::KeyAction)),
                        Keycode::F => report(bar.handle_event(InputEvent::FocusIn)),
                        Keycode::Escape => report(bar.handle_event(InputEvent::PointerCancel)),
                        Keycode::D => {
                            let on = !bar.is_enabled(2);
                            info!("Tab 2 {}", if on { "enabled" } else { "disabled" });
                            report(bar.set_enabled(2, on))
                        }
                        Keycode::L => {
                            light = !light;
                            let palette = if light {
                                TabPalette::light()
                            } else {
                                TabPalette::dark()
                            };
                            report(bar.set_palette(palette))
                        }
                        Keycode::M | Keycode::B => {
                            config = if keycode == Keycode::M {
                                let mode = match config.layout_mode {
                                    LayoutMode::Flick => LayoutMode::Paged,
                                    LayoutMode::Paged => LayoutMode::Flick,
                                };
                                TabBarConfig {
                                    show_arrows: mode == LayoutMode::Paged,
                                    ..config.with_layout_mode(mode)
                                }
                            } else {
                                let position = match config.position {
                                    TabPosition::Top => TabPosition::Bottom,
                                    TabPosition::Bottom => TabPosition::Top,
                                };
                                config.with_position(position)
                            };
                            let active = bar.active_tab().unwrap_or(0);
                            if let Some(mut rebuilt) = build_bar(config) {
                                let _ = rebuilt.set_palette(*bar.palette());
                                let _ = rebuilt.set_active_tab(active);
                                bar = rebuilt;
                            }
                            true
                        }
                        _ => false,
                    };
                }
                _ => {}
            }
        }

        needs_redraw |= report(bar.tick(FRAME_DURATION.as_millis() as u32));

        if needs_redraw {
            if let Err(e) = bar.draw(&mut display) {
                warn!("Failed to draw tab bar: {:?}", e);
            }
            let client = bar.client_rect();
            if let Err(e) = bar.surface().draw(&mut display.clipped(&client)) {
                warn!("Failed to draw panes: {:?}", e);
            }
            needs_redraw = false;
        }

        window.update(&display);
        thread::sleep(FRAME_DURATION);
    }

    info!("Simulator closed");
}
