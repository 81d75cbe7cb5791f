/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The 1024×768 world is scaled onto whatever grid the terminal offers,
/// below a one-row HUD and above the message and help rows.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use bridge_keeper::domain::entity::{ElementKind, PickupKind, VillageElement};
use bridge_keeper::domain::particles::{Particle, ParticleKind, Rgb};
use bridge_keeper::sim::snapshot::{HudStats, Outcome, SessionSummary, Snapshot};
use bridge_keeper::sim::world::{Phase, MAX_SEGMENTS, SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: [u8; 4],
    ch_len: u8,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, also used
    /// for `Clear` so inter-row gaps match the cells.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell {
        ch: [b' ', 0, 0, 0],
        ch_len: 1,
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: [b'?', 0, 0, 0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color) -> Self {
        let mut cell = Self::BLANK;
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.bg = Self::norm_bg(bg);
        cell
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or(" ")
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Background of an existing cell, for drawing glyphs over terrain.
    fn bg_at(&self, x: usize, y: usize) -> Color {
        self.get(x, y).bg
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::from_char(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::from_char(' ', Color::White, bg));
        }
    }
}

// ── Viewport: world ↔ terminal cells ──

/// Where the world map sits on the terminal grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    fn cell_w(&self) -> f32 {
        SCREEN_WIDTH / f32::from(self.cols.max(1))
    }

    fn cell_h(&self) -> f32 {
        SCREEN_HEIGHT / f32::from(self.rows.max(1))
    }

    /// World point at the centre of terminal cell `(col, row)`, if it is on the map.
    pub fn to_world(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        if col < self.col || row < self.row { return None; }
        let (vx, vy) = (col - self.col, row - self.row);
        if vx >= self.cols || vy >= self.rows { return None; }
        Some((
            (f32::from(vx) + 0.5) * self.cell_w(),
            (f32::from(vy) + 0.5) * self.cell_h(),
        ))
    }

    /// Terminal cell covering world point `(x, y)`.
    fn to_cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(0.0..=SCREEN_WIDTH).contains(&x) || !(0.0..=SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        let vx = ((x / self.cell_w()) as u16).min(self.cols.saturating_sub(1));
        let vy = ((y / self.cell_h()) as u16).min(self.rows.saturating_sub(1));
        Some((usize::from(self.col + vx), usize::from(self.row + vy)))
    }

    /// Cells covered by the world box `[x, x+w) × [y, y+h)`, at least one.
    fn cells_of(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(usize, usize, usize, usize)> {
        let (c0, r0) = self.to_cell(x, y)?;
        let (c1, r1) = self
            .to_cell((x + w - 0.01).min(SCREEN_WIDTH), (y + h - 0.01).min(SCREEN_HEIGHT))
            .unwrap_or((c0, r0));
        Some((c0, r0, c1.max(c0), r1.max(r0)))
    }
}

// ── Renderer ──

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
/// Rows kept for HUD, gap, message and help.
const RESERVED_ROWS: usize = MAP_ROW + 3;

/// World columns occupied by the river.
const RIVER_X: f32 = 600.0;
const RIVER_W: f32 = 100.0;

const GRASS: Color = Color::Rgb { r: 38, g: 70, b: 34 };
const WATER: Color = Color::Rgb { r: 30, g: 70, b: 140 };
const PLANK: Color = Color::Rgb { r: 139, g: 95, b: 52 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const HILITE: Color = Color::Rgb { r: 255, g: 220, b: 50 };
const DANGER: Color = Color::Rgb { r: 255, g: 60, b: 60 };
const GOOD: Color = Color::Rgb { r: 80, g: 255, b: 80 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    view: Viewport,
    last_phase: Option<Phase>,
    /// Keyboard enhancement flags were pushed and must be popped.
    enhanced: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            view: Viewport { col: 0, row: MAP_ROW as u16, cols: 1, rows: 1 },
            last_phase: None,
            enhanced: false,
        }
    }

    /// Enter raw mode and the alternate screen. Returns whether the terminal
    /// reports key releases.
    pub fn init(&mut self) -> io::Result<bool> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        self.enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        self.resize();
        Ok(self.enhanced)
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Map placement used by the last frame, for pointer input.
    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn render(&mut self, snap: &Snapshot<'_>, message: Option<&str>) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize();
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Detect phase change → clear for clean transition
        if self.last_phase != Some(snap.phase) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(snap.phase);
        }

        self.front.clear();

        match snap.phase {
            Phase::Menu => self.compose_menu(),
            Phase::Playing => self.compose_game(snap, message),
            Phase::Paused => {
                self.compose_game(snap, message);
                self.compose_pause_overlay(snap);
            }
            Phase::GameOver => {
                self.compose_game(snap, None);
                self.compose_game_over(&SessionSummary::from_world(snap.world));
            }
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn resize(&mut self) {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
        self.view = fit_viewport(self.term_w, self.term_h);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors; ResetColor would fall back to the terminal default.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.as_str()))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, snap: &Snapshot<'_>, message: Option<&str>) {
        self.compose_hud(&HudStats::from_world(snap.world));
        self.compose_terrain(snap.elapsed);
        self.compose_bridge(snap);

        for (i, el) in snap.elements.iter().enumerate() {
            if el.dismantled { continue; }
            let fg = if snap.pending_confirmation == Some(i) {
                DANGER
            } else if snap.hovered == Some(i) {
                HILITE
            } else {
                element_color(el.kind)
            };
            self.compose_element(el, fg);
        }

        for p in snap.pickups {
            let (glyph, fg) = match p.kind {
                PickupKind::Log => ('=', PLANK),
                PickupKind::Stone => ('o', Color::Grey),
            };
            self.put_world(p.x, p.y, glyph, fg);
        }

        let ch = snap.character;
        let glyph = if ch.is_moving() { ['@', 'a', '@', 'a'][usize::from(ch.anim_frame % 4)] } else { '@' };
        self.put_world(ch.x, ch.y, glyph, Color::White);

        for p in snap.particles {
            self.compose_particle(p, snap.elapsed);
        }

        self.compose_status(snap, message);
    }

    fn compose_hud(&mut self, hud: &HudStats) {
        let need = hud.materials_remaining;
        let line = format!(
            " Wood {:<3} Stone {:<3} Metal {:<3}│ Villagers {:<3}│ Flood {}:{:02} │ Bridge {:>3}% ({}/{}) │ Moral {} ({}) │ Need W{} S{} ",
            hud.resources.wood, hud.resources.stone, hud.resources.metal,
            hud.villagers_alive,
            hud.time_left / 60, hud.time_left % 60,
            hud.bridge_percent, hud.built_segments, MAX_SEGMENTS,
            hud.moral, hud.moral_tier.label(),
            need.wood, need.stone,
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &line, Color::White, HUD_BG);
        if hud.time_left <= 30 {
            self.front.put_str(0, HUD_ROW, "!", DANGER, HUD_BG);
        }
    }

    fn compose_terrain(&mut self, elapsed: f64) {
        let v = self.view;
        let river = v.cells_of(RIVER_X, 0.0, RIVER_W, SCREEN_HEIGHT);
        let wave = (elapsed * 4.0) as usize;
        for row in v.row as usize..(v.row + v.rows) as usize {
            for col in v.col as usize..(v.col + v.cols) as usize {
                let in_river = river.map_or(false, |(c0, _, c1, _)| (c0..=c1).contains(&col));
                let cell = if in_river {
                    let ch = if (col + row + wave) % 5 == 0 { '~' } else { ' ' };
                    Cell::from_char(ch, Color::Rgb { r: 120, g: 170, b: 230 }, WATER)
                } else {
                    Cell::from_char(' ', Color::White, GRASS)
                };
                self.front.set(col, row, cell);
            }
        }
    }

    fn compose_bridge(&mut self, snap: &Snapshot<'_>) {
        let seg_h = SCREEN_HEIGHT / MAX_SEGMENTS as f32;
        for seg in &snap.world.segments {
            let Some((c0, r0, c1, r1)) = self.view.cells_of(RIVER_X, seg.y, RIVER_W, seg_h) else {
                continue;
            };
            for row in r0..=r1 {
                for col in c0..=c1 {
                    self.front.set(col, row, Cell::from_char('=', Color::Rgb { r: 90, g: 60, b: 30 }, PLANK));
                }
            }
        }
    }

    fn compose_element(&mut self, el: &VillageElement, fg: Color) {
        let Some((c0, r0, c1, r1)) = self.view.cells_of(el.x, el.y, el.width, el.height) else {
            return;
        };
        let glyph = element_glyph(el.kind);
        for row in r0..=r1 {
            for col in c0..=c1 {
                let bg = self.front.bg_at(col, row);
                self.front.set(col, row, Cell::from_char(glyph, fg, bg));
            }
        }
        if el.villagers > 0 && c1 > c0 {
            let label = el.villagers.to_string();
            let bg = self.front.bg_at(c0, r0);
            self.front.put_str(c0, r0, &label, Color::Black, bg);
        }
    }

    fn compose_particle(&mut self, p: &Particle, elapsed: f64) {
        let fade = p.fade();
        if fade <= 0.05 { return; }
        let fg = scale(p.color, fade);
        match p.kind {
            ParticleKind::Debris { rotation, .. } => {
                let glyph = ['-', '\\', '|', '/'][((rotation.rem_euclid(std::f32::consts::PI) / std::f32::consts::FRAC_PI_4) as usize) % 4];
                self.put_world(p.x, p.y, glyph, fg);
            }
            ParticleKind::Dust { .. } => self.put_world(p.x, p.y, '.', fg),
            ParticleKind::Sparkle { twinkle } => {
                let on = ((elapsed as f32 * 10.0 + twinkle).sin()) > -0.3;
                if on { self.put_world(p.x, p.y, '*', fg); }
            }
            ParticleKind::Text { label } => {
                if let Some((col, row)) = self.view.to_cell(p.x, p.y) {
                    let bg = self.front.bg_at(col, row);
                    self.front.put_str(col, row, label, fg, bg);
                }
            }
        }
    }

    fn compose_status(&mut self, snap: &Snapshot<'_>, message: Option<&str>) {
        let msg_row = (self.view.row + self.view.rows) as usize;
        let help_row = msg_row + 1;

        let prompt = snap.pending_confirmation.and_then(|i| snap.elements.get(i)).map(|el| {
            format!(
                " Dismantle this {}? {} villager(s) will lose their home.  [Y] yes  [N] no ",
                el.kind.label().to_lowercase(), el.villagers,
            )
        });
        let hover = snap.hovered.and_then(|i| snap.elements.get(i)).map(|el| {
            let yields: Vec<String> = el.yields.entries()
                .map(|(kind, n)| format!("{} {}", n, kind.label()))
                .collect();
            format!(" {}  → {}  (moral -{}) ", el.kind.label(), yields.join(", "), el.kind.moral_penalty())
        });

        if let Some(text) = prompt {
            self.front.fill_row(msg_row, DANGER);
            self.front.put_str(0, msg_row, &text, Color::White, DANGER);
        } else if let Some(text) = message {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(0, msg_row, &format!(" {text} "), Color::Black, MSG_BG);
        } else if let Some(text) = hover {
            self.front.put_str(0, msg_row, &text, HILITE, Color::Reset);
        }

        let help = " Click/WASD: move  E/Space: interact  Click: dismantle/collect  Esc: pause  Q: quit";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
    }

    fn compose_menu(&mut self) {
        let title = [
            r"  ___      _    _            _  __                       ",
            r" | _ )_ _ (_)__| |__ _ ___  | |/ /___ ___ _ __  ___ _ _  ",
            r" | _ \ '_|| / _` / _` / -_) | ' </ -_) -_) '_ \/ -_) '_| ",
            r" |___/_|  |_\__,_\__, \___| |_|\_\___\___| .__/\___|_|   ",
            r"                 |___/                   |_|             ",
        ];
        for (i, line) in title.iter().enumerate() {
            self.front.put_str(2, 2 + i, line, HILITE, Color::Reset);
        }

        let lines = [
            ("The river is rising. Build a bridge before the flood arrives.", Color::White),
            ("Tear down the village for wood and stone. Every ruin costs moral,", Color::White),
            ("and every occupied house displaces the family inside.", Color::White),
            ("", Color::White),
            ("ENTER / SPACE   Start", GOOD),
            ("Q               Quit", Color::White),
            ("", Color::White),
            ("Controls", HILITE),
            ("  Mouse click   walk there, or dismantle / collect what is under it", Color::White),
            ("  WASD / ←→↑↓   walk        E / Space  interact with what is near", Color::White),
            ("  Y / N         answer a dismantle prompt", Color::White),
            ("  Esc           pause       R restart    M main menu", Color::White),
        ];
        for (i, (line, fg)) in lines.iter().enumerate() {
            self.front.put_str(6, 9 + i, line, *fg, Color::Reset);
        }
    }

    fn compose_pause_overlay(&mut self, snap: &Snapshot<'_>) {
        let dim = Color::Rgb { r: 40, g: 40, b: 40 };
        let blink = (snap.elapsed * 2.0) as u64 % 2 == 0;
        let v = self.view;

        let box_w = 32_usize.min(v.cols as usize);
        let box_h = 8_usize.min(v.rows as usize);
        let box_x = v.col as usize + (v.cols as usize).saturating_sub(box_w) / 2;
        let box_y = v.row as usize + (v.rows as usize).saturating_sub(box_h) / 2;

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::from_char(' ', Color::Reset, dim));
            }
        }

        let key_c = Color::Rgb { r: 100, g: 200, b: 255 };
        let label = if blink { "▶  PAUSED  ◀" } else { "   PAUSED   " };
        self.front.put_str(box_x + 10, box_y + 1, label, HILITE, dim);
        self.front.put_str(box_x + 3, box_y + 3, "Esc  Resume", key_c, dim);
        self.front.put_str(box_x + 3, box_y + 4, "R    Restart (new village)", key_c, dim);
        self.front.put_str(box_x + 3, box_y + 5, "M    Main menu", key_c, dim);
    }

    fn compose_game_over(&mut self, s: &SessionSummary) {
        let (banner, color) = match s.outcome {
            Outcome::Victory => ("★  THE BRIDGE HOLDS  ★", GOOD),
            Outcome::Defeat => ("✕  THE FLOOD TOOK THE VILLAGE  ✕", DANGER),
        };
        let saved = match s.villagers_saved {
            Some(n) => format!("Villagers saved:     {} of {}", n, s.initial_villagers),
            None => format!("Villagers saved:     none of {}", s.initial_villagers),
        };
        let lines = [
            saved,
            format!("Villagers displaced: {}", s.villagers_displaced),
            format!("Bridge completed:    {}%", s.bridge_percent),
            format!("Moral:               {} ({}, {} ending)", s.moral, s.moral_tier.label(), s.ending.label()),
            format!("Time remaining:      {}:{:02}", s.time_remaining / 60, s.time_remaining % 60),
        ];

        let dim = Color::Rgb { r: 30, g: 30, b: 30 };
        let v = self.view;
        let box_w = 58_usize.min(v.cols as usize);
        let box_h = 12_usize.min(v.rows as usize);
        let box_x = v.col as usize + (v.cols as usize).saturating_sub(box_w) / 2;
        let box_y = v.row as usize + (v.rows as usize).saturating_sub(box_h) / 2;
        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::from_char(' ', Color::Reset, dim));
            }
        }

        self.front.put_str(box_x + 3, box_y + 1, banner, color, dim);
        for (i, line) in lines.iter().enumerate() {
            self.front.put_str(box_x + 3, box_y + 3 + i, line, Color::White, dim);
        }
        self.front.put_str(box_x + 3, box_y + 9, "R: play again   M: main menu", GOOD, dim);
    }

    // ── Helpers ──

    fn put_world(&mut self, x: f32, y: f32, glyph: char, fg: Color) {
        if let Some((col, row)) = self.view.to_cell(x, y) {
            let bg = self.front.bg_at(col, row);
            self.front.set(col, row, Cell::from_char(glyph, fg, bg));
        }
    }
}

/// Largest map that fits the terminal, keeping the world's 4:3 shape with
/// cells roughly twice as tall as wide.
fn fit_viewport(term_w: usize, term_h: usize) -> Viewport {
    let rows_avail = term_h.saturating_sub(RESERVED_ROWS).max(1);
    let cols_for_rows = rows_avail * 8 / 3;
    let (cols, rows) = if cols_for_rows <= term_w {
        (cols_for_rows, rows_avail)
    } else {
        (term_w, (term_w * 3 / 8).max(1))
    };
    Viewport {
        col: 0,
        row: MAP_ROW as u16,
        cols: cols.clamp(1, u16::MAX as usize) as u16,
        rows: rows.clamp(1, u16::MAX as usize) as u16,
    }
}

fn element_glyph(kind: ElementKind) -> char {
    match kind {
        ElementKind::House => '#',
        ElementKind::Tree => '♣',
        ElementKind::Well => 'O',
        ElementKind::Fence => '+',
        ElementKind::Shed => '%',
        ElementKind::Statue => '&',
    }
}

fn element_color(kind: ElementKind) -> Color {
    match kind {
        ElementKind::House => Color::Rgb { r: 200, g: 120, b: 90 },
        ElementKind::Tree => Color::Rgb { r: 60, g: 160, b: 60 },
        ElementKind::Well => Color::Rgb { r: 150, g: 150, b: 170 },
        ElementKind::Fence => Color::Rgb { r: 170, g: 130, b: 80 },
        ElementKind::Shed => Color::Rgb { r: 160, g: 110, b: 70 },
        ElementKind::Statue => Color::Rgb { r: 210, g: 210, b: 200 },
    }
}

fn scale(c: Rgb, f: f32) -> Color {
    let s = |v: u8| (f32::from(v) * f) as u8;
    Color::Rgb { r: s(c.0), g: s(c.1), b: s(c.2) }
}
