//! Frame rendering: world pass, HUD text pass and the debug overlay.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::groundsensor::GroundSensor;
use crate::components::mapposition::MapPosition;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::assets::{FontStore, TextureStore};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldsignals::WorldSignals;

const CLEAR_COLOR: Color = Color {
    r: 25,
    g: 30,
    b: 38,
    a: 255,
};

/// Exclusive frame renderer.
///
/// Takes the raylib handles and the render target out of the world for the
/// duration of the frame, draws the world pass and the screen space text into
/// the fixed resolution target, blits it onto the window with letterboxing
/// and puts the handles back.
pub fn render_frame(world: &mut World) {
    let mut rl = world
        .remove_non_send_resource::<RaylibHandle>()
        .expect("RaylibHandle missing from world");
    let thread = world
        .remove_non_send_resource::<RaylibThread>()
        .expect("RaylibThread missing from world");
    let mut target = world
        .remove_non_send_resource::<RenderTarget>()
        .expect("RenderTarget missing from world");

    let camera = world.resource::<Camera2DRes>().0;
    let screen = *world.resource::<ScreenSize>();
    let letterbox = world
        .resource::<WindowSize>()
        .letterbox_rect(target.width, target.height);

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        {
            let mut dt = d.begin_texture_mode(&thread, &mut target.texture);
            dt.clear_background(CLEAR_COLOR);
            {
                let mut d2 = dt.begin_mode2D(camera);
                render_pass(world, &mut d2, &camera, &screen);
            }
            // Screen space pass: HUD text is not affected by the camera.
            text_pass(world, &mut dt);
        }
        d.draw_texture_pro(
            target.texture.texture(),
            target.source_rect(),
            letterbox,
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
        render_debug_ui(world, &mut d, &camera, &target);
    }

    world.insert_non_send_resource(target);
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

/// World pass: culled, z-sorted sprite drawing in camera space.
fn render_pass<D: RaylibDraw>(
    world: &mut World,
    d2: &mut D,
    camera: &Camera2D,
    screen: &ScreenSize,
) {
    let view = camera_view_rect(camera, screen.w as f32, screen.h as f32);

    // Collect the sprites whose world rect touches the view, then z-sort.
    let mut to_draw: Vec<(Sprite, Vector2, ZIndex)> = {
        let mut q = world.query::<(&Sprite, &MapPosition, &ZIndex)>();
        q.iter(world)
            .filter_map(|(s, p, z)| {
                rects_overlap(&view, &s.world_rect(p.pos)).then(|| (s.clone(), p.pos, *z))
            })
            .collect()
    };
    to_draw.sort_by_key(|(_, _, z)| *z);

    let textures = world.non_send_resource::<TextureStore>();
    for (sprite, pos, _z) in to_draw.iter() {
        let Some(tex) = textures.get(&sprite.tex_key) else {
            continue;
        };
        let src = sprite.source_rect();
        // The destination rect pins MapPosition to the sprite's pivot.
        let dest = Rectangle {
            x: pos.x,
            y: pos.y,
            width: sprite.width,
            height: sprite.height,
        };
        d2.draw_texture_pro(tex, src, dest, sprite.origin, 0.0, Color::WHITE);
    }

    if world.contains_resource::<DebugMode>() {
        debug_pass(world, d2);
    }
}

/// Debug wireframes in world space: collider boxes, ground probe circles and
/// a position cross per entity.
fn debug_pass<D: RaylibDraw>(world: &mut World, d2: &mut D) {
    let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
    for (collider, position) in colliders.iter(world) {
        let aabb = collider.get_aabb(&position.pos);
        let color = if collider.solid {
            Color::RED
        } else {
            Color::YELLOW
        };
        d2.draw_rectangle_lines(
            aabb.x as i32,
            aabb.y as i32,
            aabb.width as i32,
            aabb.height as i32,
            color,
        );
    }

    let mut sensors = world.query::<(&GroundSensor, &MapPosition)>();
    for (sensor, position) in sensors.iter(world) {
        // Circle at the far end of the downward sweep
        d2.draw_circle_lines(
            position.pos.x as i32,
            (position.pos.y + sensor.distance) as i32,
            sensor.radius,
            Color::SKYBLUE,
        );
    }

    let mut positions = world.query::<&MapPosition>();
    for position in positions.iter(world) {
        draw_cross(d2, position.pos, Color::GREEN);
    }
}

/// Five pixel cross marking a world position.
fn draw_cross<D: RaylibDraw>(d: &mut D, pos: Vector2, color: Color) {
    let (x, y) = (pos.x as i32, pos.y as i32);
    d.draw_line(x - 5, y, x + 5, y, color);
    d.draw_line(x, y - 5, x, y + 5, color);
}

/// Draw all [`DynamicText`] entities at their [`ScreenPosition`].
fn text_pass<D: RaylibDraw>(world: &mut World, d: &mut D) {
    let texts: Vec<(DynamicText, ScreenPosition)> = {
        let mut q = world.query::<(&DynamicText, &ScreenPosition)>();
        q.iter(world).map(|(t, p)| (t.clone(), *p)).collect()
    };

    let fonts = world.non_send_resource::<FontStore>();
    for (text, position) in texts.iter() {
        if let Some(font) = fonts.get(&text.font_key) {
            d.draw_text_ex(
                font,
                &text.text,
                position.anchor(),
                text.font_size,
                text.spacing,
                text.color,
            );
        }
    }
}

/// Debug overlay in window space, drawn over the letterboxed frame.
fn render_debug_ui(
    world: &mut World,
    d: &mut RaylibDrawHandle,
    camera: &Camera2D,
    target: &RenderTarget,
) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::RAYWHITE);

    let entity_count = world.entities().count_spawned();
    let text = format!("Entities: {}", entity_count);
    d.draw_text(&text, 10, 30, 10, Color::RAYWHITE);

    let mouse_pos = d.get_mouse_position();
    let mouse_game = world
        .resource::<WindowSize>()
        .to_game_coords(mouse_pos, target.width, target.height);
    let mouse_world = screen_to_world(camera, mouse_game);
    let text = format!(
        "Mouse game: ({:.1}, {:.1}) World: ({:.1}, {:.1})",
        mouse_game.x, mouse_game.y, mouse_world.x, mouse_world.y
    );
    d.draw_text(&text, 10, 50, 10, Color::RAYWHITE);

    let signals = world.resource::<WorldSignals>();
    let mut line = String::from("Signals:");
    for (key, value) in signals.integers() {
        line.push_str(&format!(" {}={}", key, value));
    }
    for (key, value) in signals.scalars() {
        line.push_str(&format!(" {}={:.1}", key, value));
    }
    for flag in signals.flags() {
        line.push_str(&format!(" +{}", flag));
    }
    d.draw_text(&line, 10, 70, 10, Color::RAYWHITE);

    let screen = *world.resource::<ScreenSize>();
    let text = format!(
        "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
        camera.target.x, camera.target.y, camera.zoom
    );
    d.draw_text(&text, 10, screen.h - 30, 10, Color::RAYWHITE);
}

/// Camera inverse transform for a point in render target space.
///
/// Rotation is ignored; the camera never rotates here.
fn screen_to_world(camera: &Camera2D, point: Vector2) -> Vector2 {
    let inv_zoom = if camera.zoom != 0.0 {
        1.0 / camera.zoom
    } else {
        1.0
    };
    Vector2 {
        x: camera.target.x + (point.x - camera.offset.x) * inv_zoom,
        y: camera.target.y + (point.y - camera.offset.y) * inv_zoom,
    }
}

/// World rectangle visible through the camera.
fn camera_view_rect(camera: &Camera2D, width: f32, height: f32) -> Rectangle {
    let tl = screen_to_world(camera, Vector2::zero());
    let br = screen_to_world(
        camera,
        Vector2 {
            x: width,
            y: height,
        },
    );
    Rectangle {
        x: tl.x.min(br.x),
        y: tl.y.min(br.y),
        width: (br.x - tl.x).abs(),
        height: (br.y - tl.y).abs(),
    }
}

/// Inclusive AABB intersection; rects sharing a bare edge still count.
fn rects_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    a.x <= b.x + b.width
        && b.x <= a.x + a.width
        && a.y <= b.y + b.height
        && b.y <= a.y + a.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(target: Vector2, offset: Vector2, zoom: f32) -> Camera2D {
        Camera2D {
            target,
            offset,
            rotation: 0.0,
            zoom,
        }
    }

    #[test]
    fn test_screen_to_world_identity() {
        let cam = camera(Vector2::zero(), Vector2::zero(), 1.0);
        let p = screen_to_world(&cam, Vector2 { x: 42.0, y: 13.0 });
        assert_eq!(p.x, 42.0);
        assert_eq!(p.y, 13.0);
    }

    #[test]
    fn test_screen_to_world_centered_camera() {
        // Camera centered on (100, 50) with the screen center as offset.
        let cam = camera(
            Vector2 { x: 100.0, y: 50.0 },
            Vector2 { x: 160.0, y: 90.0 },
            1.0,
        );
        let tl = screen_to_world(&cam, Vector2::zero());
        assert_eq!(tl.x, -60.0);
        assert_eq!(tl.y, -40.0);
    }

    #[test]
    fn test_view_rect_zoom() {
        // Zoom 2 halves the visible world extent.
        let cam = camera(Vector2::zero(), Vector2::zero(), 2.0);
        let view = camera_view_rect(&cam, 320.0, 180.0);
        assert_eq!(view.x, 0.0);
        assert_eq!(view.y, 0.0);
        assert_eq!(view.width, 160.0);
        assert_eq!(view.height, 90.0);
    }

    #[test]
    fn test_view_rect_follows_target() {
        let cam = camera(
            Vector2 { x: 300.0, y: 0.0 },
            Vector2 { x: 160.0, y: 90.0 },
            1.0,
        );
        let view = camera_view_rect(&cam, 320.0, 180.0);
        assert_eq!(view.x, 140.0);
        assert_eq!(view.y, -90.0);
        assert_eq!(view.width, 320.0);
        assert_eq!(view.height, 180.0);
    }

    #[test]
    fn test_rects_overlap_is_inclusive() {
        let a = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = Rectangle {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let c = Rectangle {
            x: 10.5,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        // touching edge still counts
        assert!(rects_overlap(&a, &b));
        assert!(!rects_overlap(&a, &c));
    }
}
