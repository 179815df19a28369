mod diffusion;
mod edges;
mod growth;
mod scenarios;
