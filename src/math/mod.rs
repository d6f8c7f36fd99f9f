pub mod math3d;
