/// Simulation energy ("alpha"): how far nodes may move per tick.
///
/// Hot at 1 after construction, refresh and resize; each tick moves alpha a
/// fixed fraction toward `target`. Once it falls under `min` the simulation
/// goes idle until something reheats or restarts it.
#[derive(Clone, Debug)]
pub struct Energy {
	alpha: f64,
	min: f64,
	decay: f64,
	target: f64,
	running: bool,
}

pub const ALPHA_MIN: f64 = 0.001;
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

impl Default for Energy {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			min: ALPHA_MIN,
			// reaches `min` from 1 in ~300 ticks
			decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			target: 0.0,
			running: true,
		}
	}
}

impl Energy {
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn target(&self) -> f64 {
		self.target
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Back to full energy.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
		self.running = true;
	}

	/// Resumes ticking without touching alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	pub fn set_target(&mut self, target: f64) {
		self.target = target;
	}

	/// Moves alpha one step toward the target and returns the alpha to run
	/// this tick with, or `None` while idle.
	pub fn advance(&mut self) -> Option<f64> {
		if !self.running {
			return None;
		}
		self.alpha += (self.target - self.alpha) * self.decay;
		if self.alpha < self.min {
			self.running = false;
		}
		Some(self.alpha)
	}
}
