/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Only single-column glyphs are drawn, so one char is one cell.

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::rating::lit_hearts;
use crate::sim::hud::{continue_label, timeline, Hud, LIFE_SLOTS};
use crate::sim::reveal::{RevealSequence, PARTICLE_X_SPREAD, PARTICLE_Y_SPREAD};
use crate::ui::view::{App, Focus, LevelsView, Screen, TitleView};

// ── Palette ──

const YELLOW: Color = Color::Rgb { r: 255, g: 214, b: 0 };
const PINK: Color = Color::Rgb { r: 255, g: 105, b: 180 };
const CYAN: Color = Color::Rgb { r: 0, g: 230, b: 255 };
const GREEN: Color = Color::Rgb { r: 80, g: 255, b: 80 };
const WALL: Color = Color::Rgb { r: 40, g: 60, b: 200 };
const DIM: Color = Color::DarkGrey;
const PANEL_BG: Color = Color::Rgb { r: 14, g: 14, b: 28 };

const GHOST_COLORS: [Color; 4] = [
    Color::Rgb { r: 255, g: 40, b: 40 },
    Color::Rgb { r: 255, g: 150, b: 200 },
    Color::Rgb { r: 0, g: 230, b: 255 },
    Color::Rgb { r: 255, g: 170, b: 60 },
];
const GHOST_STAGGER: Duration = Duration::from_millis(600);
const GHOST_LAP: Duration = Duration::from_millis(4000);
const BLINK: Duration = Duration::from_millis(500);

const FINAL_SUBTITLE: &str = "Pac-Man devoró el mensaje completo. ¿Insertas otra moneda?";
const FINAL_HIGHLIGHT: &str =
    "lo que comenzo como un intento , hoy es una obra nitida y llena de intencion.";

const MASCOT: char = 'ᗧ';
const GHOST: char = 'ᗣ';
const HEART: char = '♥';

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: [u8; 4],
    ch_len: u8,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells. Using the
    /// same RGB for `Clear` and every cell avoids seams between rows on
    /// VTE-based terminals.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell {
        ch: [b' ', 0, 0, 0],
        ch_len: 1,
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell {
        ch: [b'?', 0, 0, 0],
        ch_len: 1,
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn from_char(c: char, fg: Color, bg: Color) -> Self {
        let mut cell = Self::BLANK;
        cell.ch_len = c.encode_utf8(&mut cell.ch).len() as u8;
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
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
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

    fn put_char(&mut self, x: usize, y: usize, c: char, fg: Color, bg: Color) {
        self.set(x, y, Cell::from_char(c, fg, bg));
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, Cell::from_char(ch, fg, bg));
        }
    }

    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let x = self.width.saturating_sub(s.chars().count()) / 2;
        self.put_str(x, y, s, fg, bg);
    }

    fn fill_row(&mut self, y: usize, x0: usize, x1: usize, bg: Color) {
        for x in x0..x1.min(self.width) {
            self.set(x, y, Cell::from_char(' ', Color::White, bg));
        }
    }

    /// Single-line box outline.
    fn frame(&mut self, x: usize, y: usize, w: usize, h: usize, fg: Color) {
        if w < 2 || h < 2 {
            return;
        }
        for cx in x + 1..x + w - 1 {
            self.put_char(cx, y, '─', fg, Color::Reset);
            self.put_char(cx, y + h - 1, '─', fg, Color::Reset);
        }
        for cy in y + 1..y + h - 1 {
            self.put_char(x, cy, '│', fg, Color::Reset);
            self.put_char(x + w - 1, cy, '│', fg, Color::Reset);
        }
        self.put_char(x, y, '┌', fg, Color::Reset);
        self.put_char(x + w - 1, y, '┐', fg, Color::Reset);
        self.put_char(x, y + h - 1, '└', fg, Color::Reset);
        self.put_char(x + w - 1, y + h - 1, '┘', fg, Color::Reset);
    }
}

/// Greedy word wrap on char counts. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            lines.push(word.drain(..width).collect());
        }
        let wlen = word.len();
        if wlen == 0 {
            continue;
        }
        if line_len > 0 && line_len + 1 + wlen > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word);
        line_len += wlen;
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

fn blink_on(elapsed: Duration) -> bool {
    (elapsed.as_millis() / BLINK.as_millis()) % 2 == 0
}

/// Which screen was drawn last, to clear on change.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Drawn {
    Title,
    Levels,
    Final,
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_drawn: Option<Drawn>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_drawn: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, app: &App, gamepad: bool, now: Instant) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        let drawn = match app.screen() {
            Screen::Title(_) => Drawn::Title,
            Screen::Levels(v) if v.is_finished() => Drawn::Final,
            Screen::Levels(_) => Drawn::Levels,
        };
        if self.last_drawn != Some(drawn) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_drawn = Some(drawn);
        }

        self.front.clear();
        match app.screen() {
            Screen::Title(v) => self.compose_title(v, now),
            Screen::Levels(v) => match &v.reveal {
                Some(reveal) if v.is_finished() => self.compose_final(reveal, now),
                _ => self.compose_levels(v),
            },
        }
        self.compose_help(app, gamepad);

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors; ResetColor would fall back to the
        // terminal default and show seams.
        queue!(self.writer, SetForegroundColor(Color::White), SetBackgroundColor(Cell::BASE_BG))?;

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

    fn compose_title(&mut self, v: &TitleView, now: Instant) {
        let elapsed = now.saturating_duration_since(v.mounted_at);
        let w = self.front.width;

        self.front.put_str(2, 0, "Score: 0000", Color::White, Color::Reset);
        let lives = format!("Lives: {HEART} {HEART} {HEART}");
        self.front.put_str(w.saturating_sub(lives.chars().count() + 2), 0, &lives, PINK, Color::Reset);

        let top = (self.front.height / 2).saturating_sub(6);
        self.front.frame(w.saturating_sub(34) / 2, top, 34.min(w), 5, WALL);
        self.front.put_centered(top + 1, "PROYECTO FINAL", YELLOW, Color::Reset);
        self.front.put_centered(top + 3, "by Jessika", CYAN, Color::Reset);

        // Ghost run: the mascot leads, four ghosts chase 0.6s apart.
        let track = top + 7;
        for x in 0..w {
            if x % 3 == 1 {
                self.front.put_char(x, track, '·', DIM, Color::Reset);
            }
        }
        let lap = GHOST_LAP.as_secs_f32();
        let run_x = |delay: Duration| -> Option<usize> {
            let t = elapsed.checked_sub(delay)?.as_secs_f32();
            let frac = (t % lap) / lap;
            Some((frac * (w as f32 + 8.0)) as usize)
        };
        if let Some(x) = run_x(Duration::ZERO) {
            self.front.put_char(x, track, MASCOT, YELLOW, Color::Reset);
        }
        for (i, color) in GHOST_COLORS.iter().enumerate() {
            let delay = GHOST_STAGGER * (i as u32 + 1);
            if let Some(x) = run_x(delay) {
                self.front.put_char(x, track, GHOST, *color, Color::Reset);
            }
        }

        if blink_on(elapsed) {
            self.front.put_centered(track + 3, "▶  START  ◀", GREEN, Color::Reset);
        }
        self.front.put_centered(track + 5, "ENTER para comenzar", DIM, Color::Reset);
    }

    fn compose_levels(&mut self, v: &LevelsView) {
        let s = &v.session;
        let w = self.front.width;
        let hud = Hud::from_session(s);

        // Header
        self.front.put_str(2, 0, "AVENTURA RETRO", YELLOW, Color::Reset);
        self.front.put_str(2, 1, "Califica cada nivel antes de avanzar", DIM, Color::Reset);
        let progress = format!("PROGRESO {}%", s.progress_percent());
        self.front.put_str(w.saturating_sub(progress.len() + 2), 0, &progress, GREEN, Color::Reset);
        let bar_w = 20usize;
        let bar_x = w.saturating_sub(bar_w + 2);
        let filled = bar_w * s.progress_percent() as usize / 100;
        for i in 0..bar_w {
            let c = if i < filled { '█' } else { '░' };
            self.front.put_char(bar_x + i, 1, c, GREEN, Color::Reset);
        }

        // HUD
        let row = 3;
        let level = format!("NIVEL {}/{}", hud.level_number, hud.total_levels);
        self.front.put_str(2, row, &level, Color::White, Color::Reset);
        self.front.put_str(16, row, "VIDAS", DIM, Color::Reset);
        for i in 0..LIFE_SLOTS {
            let fg = if i < hud.lives_filled { PINK } else { DIM };
            self.front.put_char(22 + i * 2, row, HEART, fg, Color::Reset);
        }
        let track_x = 30;
        let gap = 2;
        for (i, eaten) in hud.pellets.iter().enumerate() {
            let c = if *eaten { ' ' } else { '•' };
            self.front.put_char(track_x + i * gap, row, c, YELLOW, Color::Reset);
        }
        let span = (hud.total_levels.saturating_sub(1) * gap) as f32;
        let mx = track_x + (span * hud.mascot_percent / 100.0).round() as usize;
        self.front.put_char(mx, row, MASCOT, YELLOW, Color::Reset);

        // Timeline
        let row = 5;
        let mut x = 2;
        for badge in timeline(s) {
            let label = format!("{}", badge.id);
            let (fg, bg) = match (badge.active, badge.done) {
                (true, _) => (Color::Black, YELLOW),
                (false, true) => (Color::Black, GREEN),
                (false, false) => (DIM, Color::Reset),
            };
            self.front.put_str(x, row, &format!(" {label} "), fg, bg);
            x += label.len() + 3;
        }

        // Card
        let level = s.current_level();
        let card_x = 2;
        let card_w = w.saturating_sub(4).min(76);
        let card_y = 7;
        self.front.put_str(card_x, card_y, level.title, YELLOW, Color::Reset);

        let img_h = 5;
        self.front.frame(card_x, card_y + 1, card_w, img_h, WALL);
        let img_label = format!("[ imagen {} ]", level.image);
        let img_x = card_x + card_w.saturating_sub(img_label.chars().count()) / 2;
        self.front.put_str(img_x, card_y + 1 + img_h / 2, &img_label, DIM, Color::Reset);

        let mut y = card_y + img_h + 2;
        let text_w = card_w.saturating_sub(2);
        for line in wrap(level.description, text_w) {
            self.front.put_str(card_x + 1, y, &line, Color::White, Color::Reset);
            y += 1;
        }
        y += 1;
        for line in wrap(level.tip, text_w) {
            self.front.put_str(card_x + 1, y, &line, CYAN, Color::Reset);
            y += 1;
        }

        // Hearts
        y += 1;
        let hearts_focus = v.focus == Focus::Hearts;
        let lit = lit_hearts(s.current_rating());
        self.front.put_str(card_x + 1, y, "Califica:", Color::White, Color::Reset);
        for (i, on) in lit.iter().enumerate() {
            let hx = card_x + 12 + i * 3;
            let fg = if *on { PINK } else { DIM };
            let under_cursor = hearts_focus && v.heart_cursor as usize == i + 1;
            let bg = if under_cursor { PANEL_BG } else { Color::Reset };
            if under_cursor {
                self.front.put_char(hx - 1, y, '[', Color::White, bg);
                self.front.put_char(hx + 1, y, ']', Color::White, bg);
            }
            self.front.put_char(hx, y, HEART, fg, bg);
        }

        // Continue
        y += 2;
        let label = format!(" {} ▶ ", continue_label(s));
        let enabled = s.can_advance();
        let (fg, bg) = match (enabled, v.focus == Focus::Continue) {
            (false, _) => (DIM, PANEL_BG),
            (true, true) => (Color::Black, GREEN),
            (true, false) => (GREEN, PANEL_BG),
        };
        self.front.fill_row(y, card_x + 1, card_x + 1 + label.chars().count(), bg);
        self.front.put_str(card_x + 1, y, &label, fg, bg);
        if !enabled {
            self.front.put_str(card_x + label.chars().count() + 3, y, "(califica primero)", DIM, Color::Reset);
        }
    }

    fn compose_final(&mut self, reveal: &RevealSequence, now: Instant) {
        let w = self.front.width;
        let mid = self.front.height / 2;
        let elapsed = reveal.elapsed(now);

        self.front.put_centered(mid.saturating_sub(6), "MISIÓN CUMPLIDA", YELLOW, Color::Reset);

        // Letters, then crumbs once they are eaten, then nothing after `D`.
        let letters = reveal.letters();
        let spaced = letters.len() * 2;
        let x0 = w.saturating_sub(spaced) / 2;
        let eaten = elapsed >= reveal.letters_delay() && elapsed < reveal.duration();
        for (i, c) in letters.iter().enumerate() {
            if reveal.letter_visible(i, now) {
                self.front.put_char(x0 + i * 2, mid, *c, Color::White, Color::Reset);
            } else if eaten && *c != ' ' {
                self.front.put_char(x0 + i * 2, mid, '·', DIM, Color::Reset);
            }
        }
        if elapsed < reveal.duration() {
            let mx = x0 + (spaced as f32 * reveal.mascot_progress(now)) as usize;
            self.front.put_char(mx, mid, MASCOT, YELLOW, Color::Reset);
        }

        // Particles: ±160 × ±90 mapped onto ±20 cols × ±5 rows.
        let cx = w as f32 / 2.0;
        let cy = mid as f32;
        for (i, p) in reveal.particles().iter().enumerate() {
            if !reveal.particle_visible(i, now) {
                continue;
            }
            let px = cx + p.x / PARTICLE_X_SPREAD * 20.0;
            let py = cy + p.y / PARTICLE_Y_SPREAD * 5.0;
            if px >= 0.0 && py >= 0.0 {
                let fg = GHOST_COLORS[i % GHOST_COLORS.len()];
                self.front.put_char(px as usize, py as usize, '*', fg, Color::Reset);
            }
        }

        self.front.put_centered(mid + 7, FINAL_SUBTITLE, Color::White, Color::Reset);
        let lines = wrap(FINAL_HIGHLIGHT, w.saturating_sub(8));
        for (i, line) in lines.iter().enumerate() {
            self.front.put_centered(mid + 9 + i, line, CYAN, Color::Reset);
        }
        let button = " ↺ Volver al inicio ";
        let by = mid + 10 + lines.len();
        let bx = w.saturating_sub(button.chars().count()) / 2;
        self.front.fill_row(by, bx, bx + button.chars().count(), GREEN);
        self.front.put_str(bx, by, button, Color::Black, GREEN);
    }

    fn compose_help(&mut self, app: &App, gamepad: bool) {
        let row = self.front.height.saturating_sub(1);
        let help = match app.screen() {
            Screen::Title(_) => "ENTER Start   M Música   Q Salir",
            Screen::Levels(v) if v.is_finished() => "ENTER/ESC Volver al inicio   M Música",
            Screen::Levels(_) => {
                "1-5/←→ Corazones   TAB Foco   ENTER Elegir   N Siguiente   M Música   ESC ← Volver al START"
            }
        };
        self.front.fill_row(row, 0, self.front.width, PANEL_BG);
        self.front.put_str(1, row, help, DIM, PANEL_BG);

        let mut status = String::new();
        if app.screen().is_looping() {
            status.push_str("♪ ");
        }
        if gamepad {
            status.push_str("PAD");
        }
        if !status.is_empty() {
            let x = self.front.width.saturating_sub(status.chars().count() + 1);
            self.front.put_str(x, row, &status, GREEN, PANEL_BG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("uno dos tres cuatro", 8), vec!["uno dos", "tres", "cuatro"]);
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("Dragón rápido", 6), vec!["Dragón", "rápido"]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn wrap_empty_text_is_no_lines() {
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn framebuffer_clips_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(2, 0, "hola", Color::White, Color::Reset);
        assert_eq!(fb.get(3, 0).as_str(), "o");
        fb.put_char(9, 9, 'x', Color::White, Color::Reset);
        assert!(fb.get(9, 9) == Cell::BLANK);
    }

    fn row_text(fb: &FrameBuffer, y: usize) -> String {
        (0..fb.width).map(|x| fb.get(x, y).as_str().to_string()).collect()
    }

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height).map(|y| row_text(fb, y)).collect::<Vec<_>>().join("\n")
    }

    fn sized_renderer(w: usize, h: usize) -> Renderer {
        let mut r = Renderer::new();
        r.front.resize(w, h);
        r
    }

    #[test]
    fn final_copy_is_shown_from_mount() {
        let t0 = Instant::now();
        let reveal = RevealSequence::mount("MUCHAS GRACIAS", t0);
        let mut r = sized_renderer(100, 40);
        r.compose_final(&reveal, t0);
        let text = screen_text(&r.front);
        assert!(!reveal.explosion_visible());
        assert!(text.contains("MISIÓN CUMPLIDA"));
        assert!(text.contains(FINAL_SUBTITLE));
        assert!(text.contains("lo que comenzo como un intento"));
        assert!(text.contains("Volver al inicio"));
    }

    #[test]
    fn final_letters_give_way_to_crumbs() {
        let t0 = Instant::now();
        let reveal = RevealSequence::mount("AB", t0);
        let mut r = sized_renderer(60, 30);
        let mid = 15;

        r.compose_final(&reveal, t0 + Duration::from_millis(100));
        assert!(row_text(&r.front, mid).contains('A'));
        assert!(row_text(&r.front, mid).contains('B'));

        r.front.clear();
        r.compose_final(&reveal, t0 + reveal.letters_delay());
        let row = row_text(&r.front, mid);
        assert!(!row.contains('A') && !row.contains('B'));
        assert!(row.contains('·'));
        assert!(row.contains(MASCOT));

        r.front.clear();
        r.compose_final(&reveal, t0 + reveal.duration());
        assert!(!row_text(&r.front, mid).contains(MASCOT));
    }

    #[test]
    fn cells_hold_multibyte_glyphs() {
        let c = Cell::from_char(HEART, PINK, Color::Reset);
        assert_eq!(c.as_str(), "♥");
        assert!(c.bg == Cell::BASE_BG);
    }
}
