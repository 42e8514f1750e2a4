/// runnable walkthroughs of the engine, dispatched by task number
pub mod engine_examples;
