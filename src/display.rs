//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only projects the
//! canvas onto the terminal grid and translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use turret_defense::config::FRAMES_PER_SECOND;
use turret_defense::entities::{
    Enemy, EnemyKind, GameState, GameStatus, Level, PowerUp, PowerUpKind, Turret,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER_DAY: Color = Color::DarkBlue;
const C_BORDER_DARK: Color = Color::DarkGrey;
const C_GRASS_DAY: Color = Color::Green;
const C_GRASS_DARK: Color = Color::DarkGrey;
const C_CLOUD: Color = Color::White;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_TURRET: Color = Color::Grey;
const C_TURRET_BLACKOUT: Color = Color::Red;
const C_TURRET_SHIELDED: Color = Color::Cyan;
const C_SUPPORT: Color = Color::DarkGrey;
const C_BULLET: Color = Color::Cyan;
const C_BOMB: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_EFFECT_TAG: Color = Color::Yellow;
const C_NIGHT_TAG: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas → terminal projection ─────────────────────────────────────────────

/// Maps canvas pixels onto the cells inside the border
/// (columns `1..width-1`, rows `2..height-2`).
struct Projection {
    canvas_w: f32,
    canvas_h: f32,
    left: i32,
    top: i32,
    cols: i32,
    rows: i32,
}

impl Projection {
    fn with_size(state: &GameState, width: u16, height: u16) -> Self {
        Self {
            canvas_w: state.tuning.canvas.width,
            canvas_h: state.tuning.canvas.height,
            left: 1,
            top: 2,
            cols: (i32::from(width) - 2).max(1),
            rows: (i32::from(height) - 4).max(1),
        }
    }

    fn col(&self, x: f32) -> i32 {
        self.left + (x / self.canvas_w * self.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.top + (y / self.canvas_h * self.rows as f32).floor() as i32
    }

    /// Number of cells covering `w` pixels, at least one.
    fn span(&self, w: f32) -> usize {
        ((w / self.canvas_w * self.cols as f32).round() as usize).max(1)
    }

    /// Print `text` starting at `(col, row)`, clipped to the play area.
    fn put<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        if row < self.top || row >= self.top + self.rows {
            return Ok(());
        }
        let right = self.left + self.cols - 1;
        let start = col.max(self.left);
        if start > right {
            return Ok(());
        }
        let skip = (start - col) as usize;
        let take = (right - start + 1) as usize;
        let visible: String = text.chars().skip(skip).take(take).collect();
        if visible.is_empty() {
            return Ok(());
        }
        out.queue(cursor::MoveTo(start as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(visible))?;
        Ok(())
    }
}

/// Whole seconds still to go, rounded up.
fn seconds_left(frames: u32) -> u32 {
    frames.div_ceil(FRAMES_PER_SECOND)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let proj = Projection::with_size(state, width, height);

    draw_border(out, state, width, height)?;
    draw_ground(out, state, &proj)?;
    draw_hud(out, state, width)?;

    for cloud in &state.clouds {
        let col = proj.col(cloud.x);
        proj.put(out, col, proj.row(cloud.y), "☁", C_CLOUD)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, &proj, enemy)?;
    }
    for power_up in &state.power_ups {
        draw_power_up(out, &proj, power_up)?;
    }
    for bullet in &state.bullets {
        let col = proj.col(bullet.x + bullet.width / 2.0);
        proj.put(out, col, proj.row(bullet.y), "║", C_BULLET)?;
    }
    for bomb in &state.bombs {
        let col = proj.col(bomb.x);
        proj.put(out, col, proj.row(bomb.y), "●", C_BOMB)?;
    }
    for ex in &state.explosions {
        let col = proj.col(ex.x);
        proj.put(out, col, proj.row(ex.y), "✹", C_EXPLOSION)?;
    }

    if let Some(support) = &state.support {
        draw_turret(out, &proj, &support.turret, C_SUPPORT)?;
    }
    if state.status == GameStatus::Playing {
        let color = if state.is_shielded() {
            C_TURRET_SHIELDED
        } else if state.effects.blackout.is_active() {
            C_TURRET_BLACKOUT
        } else {
            C_TURRET
        };
        draw_turret(out, &proj, &state.turret, color)?;
    }

    draw_controls_hint(out, height)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & ground ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let w = width as usize;
    let color = if state.is_dark() { C_BORDER_DARK } else { C_BORDER_DAY };

    out.queue(style::SetForegroundColor(color))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_ground<W: Write>(out: &mut W, state: &GameState, proj: &Projection) -> std::io::Result<()> {
    let color = if state.is_dark() { C_GRASS_DARK } else { C_GRASS_DAY };
    let grass = "▒".repeat(proj.cols as usize);
    let first = proj.row(state.tuning.ground_y());
    for row in first..proj.top + proj.rows {
        proj.put(out, proj.left, row, &grass, color)?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    // Score and health, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5} ", state.score)))?;

    let max = state.tuning.turret.max_health.max(1) as usize;
    let filled = state.health.clamp(0, max as i32) as usize;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!(
        "[{}{}]",
        "■".repeat(filled),
        "□".repeat(max - filled)
    )))?;

    // Level, centre
    let (level_str, level_color) = match state.level {
        Level::Easy => ("[ EASY ]", Color::Green),
        Level::Medium => ("[ MEDIUM ]", Color::Yellow),
        Level::Hard => ("[ HARD ]", Color::Red),
    };
    let lx = (width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(level_str))?;

    // Active timers, right-aligned
    let mut tags = Vec::new();
    if let Some(support) = &state.support {
        tags.push(format!("[SUPPORT {:>2}s]", seconds_left(support.remaining.remaining())));
    }
    let effects = [
        ("SHIELD", state.effects.shield),
        ("DUAL", state.effects.dual_fire),
        ("BLACKOUT", state.effects.blackout),
    ];
    for (name, countdown) in effects {
        if countdown.is_active() {
            tags.push(format!("[{} {:>2}s]", name, seconds_left(countdown.remaining())));
        }
    }
    let effect_str = tags.join(" ");
    let night_str = if state.is_night() {
        format!(" [NIGHT {:>2}s]", seconds_left(state.night.remaining()))
    } else {
        String::new()
    };

    let total = effect_str.chars().count() + night_str.chars().count();
    let rx = width.saturating_sub(total as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !effect_str.is_empty() {
        out.queue(style::SetForegroundColor(C_EFFECT_TAG))?;
        out.queue(Print(&effect_str))?;
    }
    if !night_str.is_empty() {
        out.queue(style::SetForegroundColor(C_NIGHT_TAG))?;
        out.queue(Print(&night_str))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_turret<W: Write>(
    out: &mut W,
    proj: &Projection,
    turret: &Turret,
    color: Color,
) -> std::io::Result<()> {
    // Barrel on top, body filling the turret's projected width.
    let cells = proj.span(turret.width);
    let col = proj.col(turret.x);
    let row = proj.row(turret.y);
    let barrel_col = proj.col(turret.rect().center_x());
    proj.put(out, barrel_col, row, "┃", color)?;
    let body = "█".repeat(cells);
    let bottom = proj.row(turret.rect().bottom() - 1.0);
    for r in (row + 1)..=bottom.max(row + 1) {
        proj.put(out, col, r, &body, color)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, proj: &Projection, enemy: &Enemy) -> std::io::Result<()> {
    let cells = proj.span(enemy.width);
    let col = proj.col(enemy.x);
    let row = proj.row(enemy.y);

    let (glyph, color) = match enemy.kind {
        EnemyKind::Jet => ("▼", Color::Blue),
        EnemyKind::OrangeJet => ("▼", Color::DarkYellow),
        EnemyKind::Bomber => ("▶", Color::DarkRed),
        EnemyKind::Fleet => ("◀", Color::DarkGrey),
        EnemyKind::GiantJet => ("▼", Color::DarkMagenta),
        EnemyKind::Ally => ("◀", Color::Green),
    };

    match enemy.kind {
        EnemyKind::GiantJet => {
            // Wide hull over a narrowing nose, plus remaining hit points.
            proj.put(out, col, row, &"█".repeat(cells), color)?;
            let nose = cells.saturating_sub(2).max(1);
            proj.put(out, col + 1, row + 1, &glyph.repeat(nose), color)?;
            let hp = format!("{}", enemy.hit_points);
            proj.put(out, col + cells as i32 / 2, row + 2, &hp, Color::White)?;
        }
        EnemyKind::Bomber => {
            let body = format!("<{}{}", "═".repeat(cells.saturating_sub(2)), glyph);
            proj.put(out, col, row, &body, color)?;
        }
        _ => {
            proj.put(out, col, row, &glyph.repeat(cells), color)?;
        }
    }
    Ok(())
}

/// Power-up glyphs:
///   +  (green)  Support: second turret
///   ■  (grey)   Blackout: darkened sky
///   ◆  (yellow) Shield: absorbs every hit
///   ‖  (cyan)   DualFire: two bullets per shot
fn draw_power_up<W: Write>(out: &mut W, proj: &Projection, power_up: &PowerUp) -> std::io::Result<()> {
    let (glyph, color) = match power_up.kind {
        PowerUpKind::Support => ("+", Color::Green),
        PowerUpKind::Blackout => ("■", Color::DarkGrey),
        PowerUpKind::Shield => ("◆", Color::Yellow),
        PowerUpKind::DualFire => ("‖", Color::Cyan),
    };
    let col = proj.col(power_up.x);
    proj.put(out, col, proj.row(power_up.y), glyph, color)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let survived = format!("Survived: {:>5}s", state.frame / u64::from(FRAMES_PER_SECOND));
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        (&survived, Color::DarkGrey),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_left_rounds_up() {
        assert_eq!(seconds_left(600), 10);
        assert_eq!(seconds_left(599), 10);
        assert_eq!(seconds_left(60), 1);
        assert_eq!(seconds_left(1), 1);
        assert_eq!(seconds_left(0), 0);
    }
}
