// End-to-end tests for the LumeCast service
//
// Each test boots the real router on an ephemeral port with its own work
// directory. The networked TTS endpoint is an in-process axum mock; the
// offline engine is replaced by a double that writes through the real
// audio store, so no speech software has to be installed.
//
// Tests are isolated by work directory and run in parallel.

mod test_podcast;
