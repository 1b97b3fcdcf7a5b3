//! Scene draw routines
//!
//! Pure functions from `&World` to a `Frame`. They never touch the world.
//! Layering on the page, bottom to top:
//! - sprites (images that are loaded)
//! - GPU geometry: shape fallbacks, particles, beams, the fade veil
//! - panels and labels, including every clickable control
//!
//! Controls are only laid out while they are visible, so a click on a spot
//! where a control used to be resolves to nothing.

use glam::Vec2;

use super::frame::{Frame, Label, Sprite, UiAction};
use super::shapes::{self, fade};
use super::vertex::{Vertex, colors};
use crate::assets::{AssetId, AssetProvider};
use crate::consts::*;
use crate::sim::celebration::Celebration;
use crate::sim::particles::Pools;
use crate::sim::quiz::{Quiz, QuizRecord};
use crate::sim::scenes::cabin::{Cabin, CabinKind};
use crate::sim::scenes::cinematic::CinematicScene;
use crate::sim::scenes::flying::FlyingScene;
use crate::sim::scenes::main_area::MainScene;
use crate::sim::scenes::outside::OutsideScene;
use crate::sim::ship::Ship;
use crate::sim::state::{Facing, Player};
use crate::sim::transition::boarding_look;
use crate::sim::{Rect, Scene, World};

const STAR_COUNT: u32 = 90;
const BEAM_LENGTH: f32 = 170.0;
const BUBBLE_SIZE: Vec2 = Vec2::new(130.0, 30.0);
/// Flight ship sprite size per unit of breathing scale
const FLYING_SHIP_SCALE: f32 = 0.4;

pub const DIALOG: Rect = Rect::new(
    (WORLD_WIDTH - 400.0) / 2.0,
    (WORLD_HEIGHT - 200.0) / 2.0,
    400.0,
    200.0,
);
pub const DIALOG_YES: Rect = Rect::new(DIALOG.pos.x + 80.0, DIALOG.pos.y + 140.0, 80.0, 30.0);
pub const DIALOG_NO: Rect = Rect::new(DIALOG.pos.x + 240.0, DIALOG.pos.y + 140.0, 80.0, 30.0);
pub const QUIZ_PANEL: Rect = Rect::new(150.0, 90.0, 700.0, 420.0);
pub const RESTART_BUTTON: Rect = Rect::new(WORLD_WIDTH / 2.0 - 80.0, 330.0, 160.0, 44.0);

/// Build the frame for the current world
pub fn draw(world: &World, assets: &impl AssetProvider) -> Frame {
    let mut frame = Frame::default();

    match &world.scene {
        Scene::Main(main) => draw_main(&mut frame, world, main, assets),
        Scene::Flying { flying, .. } => draw_flying(&mut frame, world, flying, assets),
        Scene::Cinematic(cinematic) => draw_cinematic(&mut frame, world, cinematic, assets),
        Scene::TransitionToInside => {
            draw_zoom_inside(&mut frame, world.transitions.to_inside.progress, assets)
        }
        Scene::InsideShip(cabin) => {
            draw_cabin(&mut frame, cabin, assets);
            draw_cabin_controls(&mut frame, cabin, &world.quiz_record);
        }
        Scene::QuizActive { cabin, quiz } => {
            draw_cabin(&mut frame, cabin, assets);
            draw_quiz(&mut frame, quiz);
        }
        Scene::OutsideShip(outside) => draw_outside(&mut frame, world, outside, assets),
        Scene::InsideRescueShip(cabin) => draw_cabin(&mut frame, cabin, assets),
    }

    for celebration in &world.celebrations {
        draw_celebration(&mut frame, celebration);
    }

    frame.darken(world.transitions.fade.veil_alpha());
    if frame.veil > 0.0 {
        frame.push(shapes::rect(world_rect(), fade(colors::BACKGROUND, frame.veil)));
    }

    if world.game_over {
        draw_terminal(&mut frame, "Game Over", "You were hit by debris");
    } else if world.rescued {
        draw_terminal(&mut frame, "Rescued!", "You made it aboard the rescue ship");
    }

    frame
}

fn world_rect() -> Rect {
    Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT)
}

/// `rect` scaled by `scale` around its centre
fn scaled(rect: Rect, scale: f32) -> Rect {
    Rect::centered(rect.center(), rect.size * scale)
}

/// Place a sprite if its image is loaded, otherwise draw the fallback shape
fn sprite_or(
    frame: &mut Frame,
    assets: &impl AssetProvider,
    sprite: Sprite,
    fallback: impl FnOnce() -> Vec<Vertex>,
) {
    if assets.is_ready(sprite.asset) {
        frame.sprite(sprite);
    } else {
        frame.push(fallback());
    }
}

fn stars(offset: Vec2, alpha: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(STAR_COUNT as usize * 6);
    for i in 0..STAR_COUNT {
        let x = (i.wrapping_mul(7919) % 1000) as f32 + offset.x;
        let y = (i.wrapping_mul(104_729) % 600) as f32 + offset.y;
        let pos = Vec2::new(x.rem_euclid(WORLD_WIDTH), y.rem_euclid(WORLD_HEIGHT));
        let size = 1.0 + (i % 3) as f32;
        vertices.extend(shapes::rect(
            Rect::from_pos_size(pos, Vec2::splat(size)),
            fade(colors::STAR, alpha),
        ));
    }
    vertices
}

fn background(
    frame: &mut Frame,
    assets: &impl AssetProvider,
    asset: AssetId,
    rect: Rect,
    alpha: f32,
    color: [f32; 4],
) {
    let starry = matches!(asset, AssetId::SpaceBackground | AssetId::HullBackground);
    let offset = rect.pos;
    sprite_or(frame, assets, Sprite::new(asset, rect).alpha(alpha), || {
        let mut vertices = shapes::rect(rect, fade(color, alpha));
        if starry {
            vertices.extend(stars(offset, alpha));
        }
        vertices
    });
}

/// Parallax backgrounds overhang the world so the edges never show
fn parallax_rect(offset: Vec2) -> Rect {
    let margin = Vec2::new(150.0, 60.0);
    Rect::from_pos_size(offset - margin, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) + margin * 2.0)
}

fn astronaut(
    frame: &mut Frame,
    assets: &impl AssetProvider,
    pos: Vec2,
    float_offset: f32,
    facing: Facing,
    alpha: f32,
    scale: f32,
) {
    let rect = scaled(
        Rect::from_pos_size(pos + Vec2::new(0.0, float_offset), Player::size()),
        scale,
    );
    let sprite = Sprite::new(AssetId::Astronaut, rect)
        .alpha(alpha)
        .flipped(facing == Facing::Left);
    sprite_or(frame, assets, sprite, || {
        let body = Rect::centered(rect.center(), rect.size * Vec2::new(0.6, 0.9));
        let visor_x = match facing {
            Facing::Left => -0.12,
            Facing::Right => 0.12,
        };
        let mut vertices = shapes::rect(body, fade(colors::PLAYER, alpha));
        vertices.extend(shapes::circle(
            rect.center() + Vec2::new(visor_x, -0.2) * rect.size,
            rect.size.x * 0.15,
            fade(colors::VISOR, alpha),
            12,
        ));
        vertices
    });
}

fn draw_player(frame: &mut Frame, assets: &impl AssetProvider, player: &Player) {
    astronaut(
        frame,
        assets,
        player.pos,
        player.float_offset(),
        player.facing,
        player.alpha,
        1.0,
    );
}

fn hull(frame: &mut Frame, assets: &impl AssetProvider, asset: AssetId, rect: Rect, color: [f32; 4]) {
    sprite_or(frame, assets, Sprite::new(asset, rect), || {
        let mut vertices = shapes::rect(
            Rect::centered(rect.center(), rect.size * Vec2::new(1.0, 0.5)),
            color,
        );
        for i in 0..3 {
            let x = rect.left() + rect.size.x * (0.3 + 0.2 * i as f32);
            vertices.extend(shapes::circle(
                Vec2::new(x, rect.center().y),
                rect.size.y * 0.08,
                colors::SHIP_WINDOW,
                10,
            ));
        }
        vertices
    });
}

fn draw_ship(frame: &mut Frame, assets: &impl AssetProvider, asset: AssetId, ship: &Ship) {
    let color = if asset == AssetId::RescueShip {
        colors::RESCUE_SHIP
    } else {
        colors::SHIP
    };
    hull(frame, assets, asset, ship.bounds(), color);
}

fn beam(frame: &mut Frame, origin: Vec2, radius: f32, pulse: f32, intensity: f32) {
    let alpha = (0.75 + 0.25 * pulse.sin()) * intensity;
    frame.push(shapes::beam_cone(
        origin,
        BEAM_LENGTH,
        radius,
        fade(colors::BEAM, alpha),
    ));
    frame.push(shapes::ring(
        origin,
        radius - 2.0,
        radius,
        fade(colors::BEAM, alpha * 0.6),
        32,
    ));
}

fn draw_ship_beam(frame: &mut Frame, ship: &Ship, radius: f32) {
    if ship.beam_active {
        beam(frame, ship.beam_origin(), radius, ship.beam_pulse, 1.0);
    }
}

fn draw_particles(frame: &mut Frame, pools: &Pools) {
    for pool in [&pools.thrusters, &pools.flames, &pools.fire] {
        for p in pool.iter() {
            frame.push(shapes::circle(p.pos, p.size, fade(p.color, p.life_fraction()), 6));
        }
    }
}

fn hint(frame: &mut Frame, text: &str) {
    frame.label(Label::new(text, Vec2::new(12.0, WORLD_HEIGHT - 16.0), 14.0, colors::TEXT).left());
}

/// Speech bubble control above `anchor`
fn bubble(frame: &mut Frame, anchor: Vec2, text: &str, action: UiAction) {
    let rect = Rect::centered(anchor - Vec2::new(0.0, BUBBLE_SIZE.y), BUBBLE_SIZE);
    frame.button(rect, text, colors::BUTTON, action);
}

fn draw_main(frame: &mut Frame, world: &World, main: &MainScene, assets: &impl AssetProvider) {
    background(frame, assets, AssetId::SpaceBackground, world_rect(), 1.0, colors::BACKGROUND);
    draw_ship(frame, assets, AssetId::Ship, &main.ship);
    draw_ship_beam(frame, &main.ship, world.tuning.main_beam_radius);
    for obstacle in &main.obstacles {
        frame.push(shapes::rect(obstacle.bounds(), colors::OBSTACLE));
    }
    draw_particles(frame, &world.pools);
    if !main.boarded {
        draw_player(frame, assets, &world.player);
    }
    hint(frame, "Move: arrows / WASD    F: fly");
}

fn draw_flying(frame: &mut Frame, world: &World, flying: &FlyingScene, assets: &impl AssetProvider) {
    background(
        frame,
        assets,
        AssetId::SpaceBackground,
        parallax_rect(flying.background),
        1.0,
        colors::BACKGROUND,
    );
    let size = Vec2::new(SHIP_WIDTH, SHIP_HEIGHT) * flying.ship_scale * FLYING_SHIP_SCALE;
    let ship = Rect::from_pos_size(
        flying.ship_pos + Vec2::new(0.0, flying.ship_float_offset()),
        size,
    );
    hull(frame, assets, AssetId::Ship, ship, colors::SHIP);
    if flying.beam_active {
        beam(
            frame,
            flying.beam_origin(),
            world.tuning.flying_beam_radius,
            flying.beam_pulse,
            1.0,
        );
    }
    draw_particles(frame, &world.pools);
    draw_player(frame, assets, &world.player);

    if flying.in_reach(world.player.center()) {
        bubble(frame, flying.beam_origin(), "Go inside", UiAction::Interact);
    }
    frame.darken(1.0 - flying.fade_in);
    hint(frame, "B: beam    E: go inside    F: back");
}

fn draw_cinematic(
    frame: &mut Frame,
    world: &World,
    cinematic: &CinematicScene,
    assets: &impl AssetProvider,
) {
    background(frame, assets, AssetId::SpaceBackground, world_rect(), 1.0, colors::BACKGROUND);
    draw_particles(frame, &world.pools);
    let bounds = cinematic.ship.bounds();
    let heading = cinematic.heading();
    let sprite = Sprite::new(AssetId::CinematicShip, bounds).rotated(heading.y.atan2(-heading.x) * 0.2);
    sprite_or(frame, assets, sprite, || {
        shapes::rotated_rect(bounds.center(), bounds.size * Vec2::new(1.0, 0.5), 0.0, colors::SHIP)
    });
}

fn draw_zoom_inside(frame: &mut Frame, progress: f32, assets: &impl AssetProvider) {
    frame.push(shapes::rect(world_rect(), colors::BACKGROUND));
    let rect = scaled(world_rect(), 0.1 + 0.9 * progress);
    background(frame, assets, AssetId::CabinBackground, rect, progress, colors::CABIN_WALL);
}

fn draw_cabin(frame: &mut Frame, cabin: &Cabin, assets: &impl AssetProvider) {
    let (asset, color) = match cabin.kind {
        CabinKind::Mothership => (AssetId::CabinBackground, colors::CABIN_WALL),
        CabinKind::RescueShip => (AssetId::RescueCabinBackground, colors::RESCUE_WALL),
    };
    background(frame, assets, asset, parallax_rect(cabin.background), 1.0, color);

    if let Some(computer) = cabin.computer() {
        sprite_or(frame, assets, Sprite::new(AssetId::Computer, computer), || {
            let mut vertices = shapes::rect(computer, colors::COMPUTER);
            vertices.extend(shapes::frame(computer, 4.0, colors::SHIP));
            vertices
        });
    }

    astronaut(
        frame,
        assets,
        cabin.player,
        cabin.float_offset(),
        cabin.facing,
        1.0,
        1.0,
    );
    frame.darken(1.0 - cabin.fade_in);
}

fn draw_cabin_controls(frame: &mut Frame, cabin: &Cabin, record: &QuizRecord) {
    if record.completed {
        let text = if record.has_won {
            format!("Quiz champion! Last score {}/{}", record.last_score, record.last_total)
        } else {
            format!("Last quiz score {}/{}", record.last_score, record.last_total)
        };
        frame.label(Label::new(text, Vec2::new(12.0, 24.0), 16.0, colors::TEXT).left());
    }

    if cabin.confirm_exit {
        frame.panel(DIALOG, colors::PANEL);
        frame.label(Label::new(
            "Leave the ship?",
            DIALOG.center() - Vec2::new(0.0, 40.0),
            22.0,
            colors::TEXT,
        ));
        frame.button(DIALOG_YES, "Yes", colors::CORRECT, UiAction::ConfirmExit);
        frame.button(DIALOG_NO, "No", colors::WRONG, UiAction::CancelExit);
        return;
    }

    if let Some(computer) = cabin.computer().filter(|_| cabin.near_computer()) {
        bubble(
            frame,
            Vec2::new(computer.center().x, computer.top()),
            "Use computer",
            UiAction::Interact,
        );
    }
    if cabin.exit_available() {
        let anchor = cabin.player + Vec2::new(PLAYER_SIZE, 0.0);
        bubble(frame, anchor, "Exit", UiAction::Exit);
    }
    hint(frame, "E: use computer    X: airlock (left wall)");
}

fn option_rect(index: usize) -> Rect {
    Rect::new(
        QUIZ_PANEL.left() + 50.0,
        QUIZ_PANEL.top() + 130.0 + index as f32 * 60.0,
        QUIZ_PANEL.size.x - 100.0,
        46.0,
    )
}

fn draw_quiz(frame: &mut Frame, quiz: &Quiz) {
    frame.panel(QUIZ_PANEL, colors::PANEL);
    let Some(question) = quiz.current_question() else {
        return;
    };
    frame.label(Label::new(
        format!(
            "Question {} of {}    Score: {}",
            quiz.current + 1,
            quiz.questions.len(),
            quiz.score
        ),
        Vec2::new(QUIZ_PANEL.center().x, QUIZ_PANEL.top() + 35.0),
        16.0,
        colors::WARNING,
    ));
    frame.label(Label::new(
        question.question.clone(),
        Vec2::new(QUIZ_PANEL.center().x, QUIZ_PANEL.top() + 85.0),
        22.0,
        colors::TEXT,
    ));

    for (index, option) in question.options.iter().enumerate() {
        let rect = option_rect(index);
        match &quiz.selected {
            None => frame.button(rect, option, colors::BUTTON, UiAction::Answer(index)),
            Some(selected) => {
                // Locked: colour the result, no more clicks
                let color = if *option == question.answer {
                    colors::CORRECT
                } else if option == selected {
                    colors::WRONG
                } else {
                    fade(colors::BUTTON, 0.5)
                };
                frame.panel(rect, color);
                frame.label(Label::new(option.clone(), rect.center(), 16.0, colors::TEXT));
            }
        }
    }
}

fn draw_outside(frame: &mut Frame, world: &World, outside: &OutsideScene, assets: &impl AssetProvider) {
    let tuning = &world.tuning;
    background(frame, assets, AssetId::HullBackground, world_rect(), 1.0, colors::HULL);

    let gate = OutsideScene::gate();
    sprite_or(frame, assets, Sprite::new(AssetId::Gate, gate), || {
        let mut vertices = shapes::rect(gate, colors::GATE);
        vertices.extend(shapes::frame(gate, 6.0, colors::SHIP));
        vertices
    });

    draw_ship(frame, assets, AssetId::Ship, &outside.arrival);
    draw_ship_beam(frame, &outside.arrival, tuning.arrival_beam_radius);
    if let Some(rescue) = &outside.rescue {
        draw_ship(frame, assets, AssetId::RescueShip, rescue);
        draw_ship_beam(frame, rescue, tuning.rescue_beam_radius);
    }
    for hazard in &outside.survival.hazards {
        frame.push(shapes::rect(hazard.bounds(), hazard.color));
    }
    draw_particles(frame, &world.pools);

    let boarding = &world.transitions.rescue_boarding;
    if boarding.active {
        let look = boarding_look(boarding.progress);
        let rect = scaled(world_rect(), look.background_scale);
        background(
            frame,
            assets,
            AssetId::RescueCabinBackground,
            rect,
            look.background_opacity,
            colors::RESCUE_WALL,
        );
        let player = &world.player;
        astronaut(
            frame,
            assets,
            player.pos,
            player.float_offset(),
            player.facing,
            player.alpha * look.player_opacity,
            look.player_scale,
        );
        return;
    }

    draw_player(frame, assets, &world.player);

    let remaining = outside.survival.remaining(tuning).div_ceil(TARGET_FPS as u32);
    let clock = if outside.survived {
        "You survived! Hold on".to_string()
    } else {
        format!("Survive: {remaining}s")
    };
    frame.label(Label::new(clock, Vec2::new(WORLD_WIDTH / 2.0, 28.0), 20.0, colors::TEXT));
    if let Some((banner, _)) = outside.banner {
        frame.label(Label::new(
            banner.text(),
            Vec2::new(WORLD_WIDTH / 2.0, 64.0),
            18.0,
            colors::WARNING,
        ));
    }
    if outside.near_gate(world.player.center()) {
        bubble(
            frame,
            Vec2::new(gate.center().x - BUBBLE_SIZE.x / 2.0, gate.top()),
            "Go inside",
            UiAction::Interact,
        );
    }
}

fn draw_celebration(frame: &mut Frame, celebration: &Celebration) {
    let alpha = celebration.opacity();
    for c in &celebration.confetti {
        frame.push(shapes::rotated_rect(c.pos, c.size, c.rotation, fade(c.color, alpha)));
    }
    for r in &celebration.ribbons {
        let segments = 6;
        let step = r.length / segments as f32;
        for k in 0..segments {
            let y = r.pos.y + k as f32 * step;
            let x = r.pos.x + (r.wave_phase + k as f32 * 0.8).sin() * 6.0;
            frame.push(shapes::rect(
                Rect::new(x - 2.0, y, 4.0, step + 1.0),
                fade(r.color, alpha),
            ));
        }
    }
    if celebration.show_message() {
        frame.label(Label::new(
            celebration.kind.headline(),
            Vec2::new(WORLD_WIDTH / 2.0, 200.0),
            36.0,
            fade(colors::WARNING, alpha),
        ));
    }
}

fn draw_terminal(frame: &mut Frame, title: &str, subtitle: &str) {
    frame.panel(world_rect(), fade(colors::PANEL, 0.7));
    frame.label(Label::new(title, Vec2::new(WORLD_WIDTH / 2.0, 230.0), 48.0, colors::TEXT));
    frame.label(Label::new(subtitle, Vec2::new(WORLD_WIDTH / 2.0, 285.0), 20.0, colors::TEXT));
    frame.button(RESTART_BUTTON, "Play again", colors::BUTTON, UiAction::Restart);
}
