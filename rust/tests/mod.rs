mod merge;
mod window;
