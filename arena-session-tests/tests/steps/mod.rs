mod rematch_steps;
mod replay_steps;
mod room_lifecycle_steps;
