mod repos;

mod alias_resolution;
mod execution;
mod rewrites;
