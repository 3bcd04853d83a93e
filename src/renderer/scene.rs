//! Scene to draw calls
//!
//! Paint order: background, enemies with their hit point bars, corpses,
//! obstacles on top (so hiding enemies disappear), popups, score.

use glam::Vec2;

use super::cache::{ImageCache, ImageLoader};
use super::{BLACK, Fill, GREEN, Rect, Renderer};
use crate::consts::{HP_BAR_HEIGHT, HP_BAR_INSET, HP_BAR_OFFSET};
use crate::sim::{Body, Enemy, Facing, GameState};

pub const BACKGROUND_SPRITE: &str = "background.png";
pub const OBSTACLE_SPRITE: &str = "crate.png";

/// Sprite for an enemy's facing, with the dead variant once it has died
pub fn enemy_sprite(enemy: &Enemy) -> &'static str {
    match (enemy.facing(), enemy.is_dead()) {
        (Facing::Left, false) => "canpooper_left.png",
        (Facing::Right, false) => "canpooper_right.png",
        (Facing::Left, true) => "canpooper_left_dead.png",
        (Facing::Right, true) => "canpooper_right_dead.png",
    }
}

fn pixel_size(size: Vec2) -> (u32, u32) {
    (size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32)
}

/// Load every sprite the scene can draw, so missing assets fail at startup
pub fn preload_sprites<L: ImageLoader>(
    cache: &mut ImageCache<L>,
    state: &GameState,
) -> Result<(), crate::error::AssetError> {
    let (sw, sh) = pixel_size(state.config.screen_bounds);
    let (ew, eh) = pixel_size(state.config.spawn.size);
    let mut images = vec![
        (BACKGROUND_SPRITE, sw, sh),
        ("canpooper_left.png", ew, eh),
        ("canpooper_right.png", ew, eh),
        ("canpooper_left_dead.png", ew, eh),
        ("canpooper_right_dead.png", ew, eh),
    ];
    for obstacle in &state.obstacles {
        let (w, h) = pixel_size(obstacle.size);
        images.push((OBSTACLE_SPRITE, w, h));
    }
    cache.preload(&images)
}

fn draw_hp_bar<H, R: Renderer<H>>(renderer: &mut R, body: &Body) {
    if body.is_invulnerable() || body.hp == body.max_hp() {
        return;
    }
    let outline = Rect::new(
        Vec2::new(body.pos.x, body.pos.y - HP_BAR_OFFSET),
        Vec2::new(body.size.x, HP_BAR_HEIGHT),
    );
    renderer.draw_rect(outline, BLACK, Fill::Outline(1));

    let inner_width = (body.size.x - 2.0 * HP_BAR_INSET).max(0.0);
    let bar = Rect::new(
        outline.pos + Vec2::splat(HP_BAR_INSET),
        Vec2::new(
            inner_width * body.hp_fraction(),
            HP_BAR_HEIGHT - 2.0 * HP_BAR_INSET,
        ),
    );
    renderer.draw_rect(bar, GREEN, Fill::Solid);
}

fn draw_enemy<L, R>(
    cache: &mut ImageCache<L>,
    renderer: &mut R,
    enemy: &Enemy,
) -> Result<(), crate::error::AssetError>
where
    L: ImageLoader,
    R: Renderer<L::Handle>,
{
    let (w, h) = pixel_size(enemy.body.size);
    let image = cache.get(enemy_sprite(enemy), w, h)?;
    renderer.draw(&image, enemy.body.pos);
    Ok(())
}

/// Emit the draw calls for one frame
pub fn draw_scene<L, R>(
    state: &GameState,
    cache: &mut ImageCache<L>,
    renderer: &mut R,
) -> Result<(), crate::error::AssetError>
where
    L: ImageLoader,
    R: Renderer<L::Handle>,
{
    let (sw, sh) = pixel_size(state.config.screen_bounds);
    let background = cache.get(BACKGROUND_SPRITE, sw, sh)?;
    renderer.draw(&background, Vec2::ZERO);

    for enemy in &state.enemies {
        draw_enemy(cache, renderer, enemy)?;
        draw_hp_bar::<L::Handle, R>(renderer, &enemy.body);
    }
    for corpse in &state.corpses {
        draw_enemy(cache, renderer, corpse)?;
    }

    for obstacle in &state.obstacles {
        let (w, h) = pixel_size(obstacle.size);
        let image = cache.get(OBSTACLE_SPRITE, w, h)?;
        renderer.draw(&image, obstacle.pos);
    }

    for popup in &state.popups {
        renderer.draw_text(&popup.text, popup.body.pos);
    }
    renderer.draw_text(&format!("Score: {}", state.score), Vec2::new(10.0, 10.0));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList, MemoryLoader};
    use crate::settings::GameConfig;

    fn all_sprites() -> MemoryLoader {
        MemoryLoader::new([
            BACKGROUND_SPRITE,
            OBSTACLE_SPRITE,
            "canpooper_left.png",
            "canpooper_right.png",
            "canpooper_left_dead.png",
            "canpooper_right_dead.png",
        ])
    }

    fn quiet_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 5).unwrap();
        state.spawners.clear();
        state
    }

    #[test]
    fn test_preload_and_draw_without_new_loads() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(400.0, 100.0));
        let mut cache = ImageCache::new(all_sprites(), "assets");
        preload_sprites(&mut cache, &state).unwrap();
        let loads = cache.loader().loads();

        let mut list = DrawList::new();
        draw_scene(&state, &mut cache, &mut list).unwrap();
        assert_eq!(cache.loader().loads(), loads);

        let images = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count();
        // background + enemy + two crates
        assert_eq!(images, 4);
    }

    #[test]
    fn test_preload_fails_on_missing_sprite() {
        let state = quiet_state();
        let mut cache = ImageCache::new(MemoryLoader::new([BACKGROUND_SPRITE]), "assets");
        assert!(preload_sprites(&mut cache, &state).is_err());
    }

    #[test]
    fn test_hp_bar_only_when_damaged() {
        let mut list: DrawList<u32> = DrawList::new();
        let mut body = Body::new(Vec2::new(10.0, 50.0), Vec2::splat(50.0), 0, 100);
        draw_hp_bar(&mut list, &body);
        assert!(list.is_empty());

        body.apply_damage(50);
        draw_hp_bar(&mut list, &body);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.commands[0],
            DrawCommand::Rect {
                rect: Rect::new(Vec2::new(10.0, 35.0), Vec2::new(50.0, 10.0)),
                color: BLACK,
                fill: Fill::Outline(1),
            }
        );
        assert_eq!(
            list.commands[1],
            DrawCommand::Rect {
                rect: Rect::new(Vec2::new(13.0, 38.0), Vec2::new(22.0, 4.0)),
                color: GREEN,
                fill: Fill::Solid,
            }
        );
    }

    #[test]
    fn test_sprite_follows_facing_and_death() {
        let mut state = quiet_state();
        state.spawn_enemy(Vec2::new(400.0, 100.0));
        let enemy = &mut state.enemies[0];
        assert_eq!(enemy_sprite(enemy), "canpooper_right.png");
        enemy.change_direction();
        assert_eq!(enemy_sprite(enemy), "canpooper_left.png");
    }
}
