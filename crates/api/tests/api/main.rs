mod helpers;

mod lists;
mod meta;
mod pivot;
mod stats;
