//! Terminal rendering of a [`GameSnapshot`].
//!
//! The playfield is sampled onto the character grid: each cell shows
//! whatever body covers the logical point at its center.

use crate::core::constants::{ENCOUNTER_PLAYER_HP, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::encounter::{Encounter, EncounterPhase};
use crate::entities::{PowerUpKind, Rect as Body};
use crate::session::{GameSnapshot, GameState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_game(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Skyflap ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(inner);

    match snap.state {
        GameState::Start => render_message(
            frame,
            h_chunks[0],
            "SKYFLAP",
            &["Space / Enter to start", "", "Space/Up flap   A/F fire", "Esc/q quit"],
        ),
        GameState::Over => render_message(
            frame,
            h_chunks[0],
            "GAME OVER",
            &[format!("Score: {}", snap.score).as_str(), "", "Press Enter"],
        ),
        GameState::NameEntry => render_name_entry(frame, h_chunks[0], snap),
        GameState::Leaderboard => render_leaderboard(frame, h_chunks[0], snap),
        _ => render_play_area(frame, h_chunks[0], snap),
    }
    render_info_panel(frame, h_chunks[1], snap);
}

fn covers(body: &Body, x: f64, y: f64) -> bool {
    x >= body.x && x < body.right() && y >= body.y && y < body.bottom()
}

fn render_play_area(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let shake = snap.death.as_ref().map_or(0.0, |d| d.shake_offset);
    let x_scale = SCREEN_WIDTH / width as f64;
    let y_scale = SCREEN_HEIGHT / height as f64;
    let bird = snap.bird.rect();

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let y = (row as f64 + 0.5) * y_scale;
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let x = (col as f64 + 0.5) * x_scale + shake;
            spans.push(cell(snap, &bird, x, y));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);

    if let Some(boss) = &snap.boss {
        render_boss_overlay(frame, area, boss);
    }
    if let Some(secs) = snap.countdown {
        render_message(frame, area, &secs.max(1).to_string(), &["Get ready"]);
    }
}

fn cell(snap: &GameSnapshot, bird: &Body, x: f64, y: f64) -> Span<'static> {
    if covers(bird, x, y) {
        let (glyph, color) = if snap.death.is_some() {
            ("✸", Color::Red)
        } else if snap.bird.shield_active {
            ("◉", Color::LightBlue)
        } else if snap.bird.velocity < -0.5 {
            ("▲", Color::Yellow)
        } else {
            ("►", Color::Yellow)
        };
        return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    if snap.fireballs.iter().any(|f| covers(&f.rect, x, y)) {
        return Span::styled("•", Style::default().fg(Color::LightRed));
    }
    if snap.enemies.iter().any(|e| covers(&e.rect, x, y)) {
        return Span::styled("☠", Style::default().fg(Color::Magenta));
    }
    if let Some(p) = snap.power_ups.iter().find(|p| covers(&p.rect, x, y)) {
        let (glyph, color) = match p.kind {
            PowerUpKind::Shield => ("S", Color::LightBlue),
            PowerUpKind::SlowMotion => ("Z", Color::Cyan),
            PowerUpKind::Points => ("$", Color::LightYellow),
        };
        return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    if let Some(pipe) = snap
        .pipes
        .iter()
        .find(|p| covers(&p.top_rect(), x, y) || covers(&p.bottom_rect(), x, y))
    {
        let color = if pipe.is_power { Color::LightMagenta } else { Color::Green };
        return Span::styled("█", Style::default().fg(color));
    }
    Span::raw(" ")
}

fn hp_bar(current: u32, max: u32, width: usize) -> String {
    let filled = (current as usize * width).div_ceil(max.max(1) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_boss_overlay(frame: &mut Frame, area: Rect, boss: &Encounter) {
    let mut lines = vec![
        Line::from(Span::styled(
            boss.variant.name().to_uppercase(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Boss {}", hp_bar(boss.boss_hp, boss.boss_max_hp, 12))),
        Line::from(format!("You  {}", hp_bar(boss.player_hp, ENCOUNTER_PLAYER_HP, 12))),
    ];
    let status = match boss.phase {
        EncounterPhase::Entry => "A challenger approaches!".to_string(),
        EncounterPhase::Exchange => match boss.last_exchange {
            Some(ex) => match ex.damage_taken {
                Some(dmg) => format!("Hit for {}, took {}", ex.damage_dealt, dmg),
                None => format!("Hit for {}, boss missed", ex.damage_dealt),
            },
            None => "Fight!".to_string(),
        },
        EncounterPhase::Victory | EncounterPhase::Done => {
            format!("Victory! +{}", boss.variant.victory_bonus())
        }
    };
    lines.push(Line::from(status));

    // The box slides in from the right edge with the boss.
    let width = 26.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let slide = (boss.boss_x / SCREEN_WIDTH).clamp(0.0, 1.0);
    let left = ((area.width.saturating_sub(width)) as f64 * slide) as u16;
    let rect = Rect::new(area.x + left, area.y + 1, width, height);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
        rect,
    );
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, body: &[&str]) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body.iter().map(|s| Line::from(s.to_string())));

    let height = (lines.len() as u16).min(area.height);
    let rect = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height) / 2,
        area.width,
        height,
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

fn render_name_entry(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let name = format!("{}_", snap.name_buffer);
    render_message(
        frame,
        area,
        "NEW HIGH SCORE!",
        &[
            format!("Score: {}", snap.score).as_str(),
            "",
            "Enter your name (1-10 letters/digits):",
            name.as_str(),
            "",
            "Enter to submit",
        ],
    );
}

fn render_leaderboard(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let mut lines = vec![
        Line::from(Span::styled(
            "LEADERBOARD",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if snap.leaderboard.is_empty() {
        lines.push(Line::from("No scores yet"));
    }
    for (i, entry) in snap.leaderboard.iter().enumerate() {
        lines.push(Line::from(format!(
            "{:>2}. {:<10} {:>5}  {}",
            i + 1,
            entry.name,
            entry.score,
            entry.date.format("%Y-%m-%d")
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Press Enter to continue"));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = |name: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {}: ", name), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let mut lines = vec![
        label("Score", snap.score.to_string(), Color::White),
        label("Best", snap.high_score.to_string(), Color::Yellow),
        label("Speed", format!("{:.2}x", snap.speed_level), Color::Cyan),
        Line::from(""),
    ];
    if snap.bird.shield_active {
        lines.push(label(
            "Shield",
            format!("{}s", snap.bird.shield_ticks / 60 + 1),
            Color::LightBlue,
        ));
    }
    if snap.slowdown_active {
        lines.push(Line::from(Span::styled(
            " Slow motion!",
            Style::default().fg(Color::Cyan),
        )));
    }
    if snap.beat_leader_banner {
        lines.push(Line::from(Span::styled(
            " NEW LEADER!",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
