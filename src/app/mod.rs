// NixonKit - app/mod.rs
//
// Application layer: wires a logger and an asset directory into one
// toolkit handle for the binary and for embedding applications.
// Dependencies: core layer, platform layer.

pub mod context;
