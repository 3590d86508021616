/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and a `Snapshot` of the last
/// completed tick.  No game logic is performed; this module only scales
/// playfield pixels down to terminal cells and prints them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sky_raider::entities::{
    BulletStyle, Mode, ParticleKind, PowerUpEffect, Snapshot, TargetTier,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_CRAFT: Color = Color::White;
const C_CRAFT_POWERED: Color = Color::Cyan;
const C_TARGET_REGULAR: Color = Color::Green;
const C_TARGET_FAST: Color = Color::Magenta;
const C_TARGET_TANK: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_BULLET_POWERED: Color = Color::Yellow;
const C_STAR: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Maps playfield pixels onto the bordered terminal area.
struct Viewport {
    term_w: u16,
    term_h: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn cols(&self) -> f32 {
        self.term_w.saturating_sub(2) as f32
    }

    fn rows(&self) -> f32 {
        self.term_h.saturating_sub(4) as f32
    }

    /// Terminal cell for a playfield point, or `None` if it falls outside
    /// the bordered area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / self.world_w * self.cols()).floor();
        let row = (y / self.world_h * self.rows()).floor();
        if !(0.0..self.cols()).contains(&col) || !(0.0..self.rows()).contains(&row) {
            return None;
        }
        Some((col as u16 + 1, row as u16 + 2))
    }

    /// Width of a playfield span in cells, at least one.
    fn span(&self, w: f32) -> usize {
        ((w / self.world_w * self.cols()).round() as usize).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot<'_>) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let view = Viewport { term_w, term_h, world_w: snap.width, world_h: snap.height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, snap, &view)?;

    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in snap.stars {
        put(out, &view, star.x, star.y, if star.size > 1.5 { "+" } else { "." })?;
    }

    for target in snap.targets {
        let (color, glyph) = match target.tier {
            TargetTier::Regular => (C_TARGET_REGULAR, '▼'),
            TargetTier::Fast => (C_TARGET_FAST, '◆'),
            TargetTier::Tank => (C_TARGET_TANK, '█'),
        };
        let text: String = std::iter::repeat(glyph).take(view.span(target.width)).collect();
        out.queue(style::SetForegroundColor(color))?;
        put(out, &view, target.x, target.y, &text)?;
    }

    for power_up in snap.power_ups {
        let (color, glyph) = match power_up.effect {
            PowerUpEffect::Health => (Color::Magenta, "♥"),
            PowerUpEffect::Weapon => (Color::Yellow, "★"),
        };
        out.queue(style::SetForegroundColor(color))?;
        put(out, &view, power_up.x, power_up.y, glyph)?;
    }

    for bullet in snap.bullets {
        let color = match bullet.style {
            BulletStyle::Standard => C_BULLET,
            BulletStyle::Powered => C_BULLET_POWERED,
        };
        out.queue(style::SetForegroundColor(color))?;
        put(out, &view, bullet.x, bullet.y, "║")?;
    }

    for p in snap.explosions {
        let (color, glyph) = match p.kind {
            ParticleKind::Spark => (Color::Yellow, "*"),
            ParticleKind::Fire => (Color::Red, "░"),
            ParticleKind::Debris => (Color::Grey, ","),
            ParticleKind::Flare => (Color::Cyan, "~"),
        };
        out.queue(style::SetForegroundColor(color))?;
        put(out, &view, p.x, p.y, glyph)?;
    }

    if !snap.craft.exploding && snap.mode != Mode::GameOver {
        draw_craft(out, snap, &view)?;
    }
    draw_controls_hint(out, term_h)?;

    match snap.mode {
        Mode::Paused => draw_banner(out, &view, &[("║      PAUSED      ║", Color::Yellow)])?,
        Mode::GameOver => draw_game_over(out, snap, &view)?,
        Mode::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn put<W: Write>(out: &mut W, view: &Viewport, x: f32, y: f32, text: &str) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.term_w as usize;
    let h = view.term_h;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.term_w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot<'_>, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", snap.score)))?;

    let level_str = format!("[ LEVEL {} ]", snap.level);
    let lx = (view.term_w / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(&level_str))?;

    let hearts: String = "♥".repeat(snap.craft.health as usize);
    let lives_text = format!("Health: {}", hearts);
    let rx = view
        .term_w
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Craft ─────────────────────────────────────────────────────────────────────

fn draw_craft<W: Write>(out: &mut W, snap: &Snapshot<'_>, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows):
    //   ▲       ← nose
    //  /|\      ← wings + fuselage, engine glow below when bright
    let c = snap.craft;
    let color = if c.powered_up { C_CRAFT_POWERED } else { C_CRAFT };
    out.queue(style::SetForegroundColor(color))?;

    let cx = c.x + c.width / 2.0;
    put(out, view, cx, c.y, "▲")?;
    if let Some((col, row)) = view.cell(cx, c.y + c.height / 2.0) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(Print("/|\\"))?;
    }
    if c.engine_glow > 0.65 {
        out.queue(style::SetForegroundColor(Color::DarkYellow))?;
        put(out, view, cx, c.y + c.height, "'")?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, term_h: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, view: &Viewport, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let cx = view.term_w / 2;
    let start_row = (view.term_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot<'_>, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}  (level {})", snap.score, snap.level);
    draw_banner(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("R - Play Again  M - Menu  Q - Quit", Color::White),
        ],
    )
}
