mod common;
mod recommendation;
mod scoring;
