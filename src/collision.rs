//! Collision queries. All functions are pure predicates; the session
//! decides what a hit means.

use crate::core::SCREEN_HEIGHT;
use crate::entities::{Bird, Pipe, Rect};

/// Standard axis-aligned overlap test.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Bird touches the ceiling or the floor.
pub fn out_of_bounds(bird: &Bird) -> bool {
    bird.y <= 0.0 || bird.y + bird.height >= SCREEN_HEIGHT
}

/// Bird overlaps the top or the bottom half of a pipe.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let hitbox = bird.hitbox();
    intersects(&hitbox, &pipe.top_rect()) || intersects(&hitbox, &pipe.bottom_rect())
}

/// Id of the first pipe the bird overlaps.
pub fn first_pipe_hit(bird: &Bird, pipes: &[Pipe]) -> Option<u32> {
    pipes.iter().find(|p| hits_pipe(bird, p)).map(|p| p.id)
}
