mod cursor_flow;
mod helpers;
mod overlay_flow;
