mod config;
mod generator;
mod io;
