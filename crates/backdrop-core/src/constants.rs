// Shared tuning constants for the backdrop scene, used by both the
// simulation core and the native frontend.

// Fixed populations; nothing is added or removed after `Scene::new`.
pub const WAVE_LAYER_COUNT: usize = 3;
pub const PARTICLE_COUNT: usize = 120;
pub const BEAM_COUNT: usize = 16;

// Time
pub const TIME_STEP: f32 = 0.02; // seconds advanced per frame

// Camera
pub const CAMERA_Z: f32 = 50.0;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Wave grid geometry
pub const WAVE_WIDTH: f32 = 200.0;
pub const WAVE_DEPTH: f32 = 100.0;
pub const WAVE_SEGMENTS_X: usize = 100;
pub const WAVE_SEGMENTS_Y: usize = 50;

// Wave motion
pub const WAVE_FREQ: f32 = 0.05; // spatial frequency of the sine field
pub const WAVE_BASE_TILT: f32 = -std::f32::consts::FRAC_PI_4;
pub const WAVE_ROLL_RATE: f32 = 0.1;
pub const WAVE_ROLL_AMPLITUDE: f32 = 0.05;
pub const WAVE_OPACITY: f32 = 0.15;

// Per-layer presets: (color, vertical offset, amplitude)
pub const WAVE_LAYERS: [([f32; 3], f32, f32); WAVE_LAYER_COUNT] = [
    ([0.290, 0.565, 0.886], 0.0, 5.0),   // blue
    ([0.314, 0.890, 0.761], -5.0, 1.5),  // cyan
    ([0.608, 0.318, 0.878], -10.0, 1.0), // purple
];

// Particle anchors span +/- half of each volume axis
pub const PARTICLE_VOLUME_X: f32 = 200.0;
pub const PARTICLE_VOLUME_Y: f32 = 100.0;
pub const PARTICLE_VOLUME_Z: f32 = 50.0;

// Particle motion
pub const ORBIT_RADIUS_MIN: f32 = 2.0;
pub const ORBIT_RADIUS_MAX: f32 = 8.0;
pub const ANGULAR_SPEED_MIN: f32 = 0.2;
pub const ANGULAR_SPEED_MAX: f32 = 1.2;
pub const VERTICAL_PULSE_AMP: f32 = 1.5;
pub const VERTICAL_PULSE_RATE: f32 = 0.7;

// Particle appearance; hue sampled from a restricted cyan..violet band
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_MAX: f32 = 3.0;
pub const SIZE_PULSE_FRACTION: f32 = 0.35; // relative size swing
pub const SIZE_PULSE_RATE: f32 = 2.0;
pub const PARTICLE_HUE_MIN: f32 = 0.45;
pub const PARTICLE_HUE_MAX: f32 = 0.85;
pub const PARTICLE_SATURATION: f32 = 0.8;
pub const PARTICLE_LIGHTNESS: f32 = 0.5;
pub const PARTICLE_OPACITY: f32 = 0.3;

// Pointer interaction
pub const WAVE_POINTER_TILT: f32 = 0.1; // radians per unit of NDC deflection
pub const PARTICLE_GROUP_TILT: f32 = 0.05;
pub const REPULSE_RADIUS: f32 = 12.0;
pub const REPULSE_STRENGTH: f32 = 6.0;
pub const REPULSE_MIN_DIST: f32 = 0.5;
pub const REPULSE_MAX_OFFSET: f32 = 10.0;
pub const REPULSE_DECAY_PER_STEP: f32 = 0.985;

// Beams
pub const BEAM_SPEED_MIN: f32 = 0.4;
pub const BEAM_SPEED_MAX: f32 = 1.6;
pub const BEAM_MAX_AGE_MIN: f32 = 1.5;
pub const BEAM_MAX_AGE_MAX: f32 = 4.0;
pub const BEAM_LENGTH: f32 = 6.0;
pub const BEAM_OPACITY: f32 = 0.4;
