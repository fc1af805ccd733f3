use hecs::World;

use crate::components::{Direction, Paddle, PaddleIntent};
use crate::resources::IntentQueue;

/// Move queued intents onto paddle entities. Paddles without a queued
/// intent this tick stop.
pub fn ingest_intents(world: &mut World, queue: &mut IntentQueue) {
    let intents = queue.pop_intents();

    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        intent.dir = intents
            .iter()
            .find(|(player, _)| *player == paddle.player)
            .map(|(_, dir)| *dir)
            .unwrap_or(Direction::Stop);
    }
}
