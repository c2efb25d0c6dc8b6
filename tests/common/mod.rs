use minibasic::mach::{Event, Runtime};

pub fn runtime(lines: &[&str]) -> Runtime {
    let mut r = Runtime::new();
    for line in lines {
        r.enter(line);
    }
    r
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Collect printed lines until the run ends, pauses for input, or
/// uses up `cycles` steps.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    for event in runtime.steps().take(cycles) {
        match event {
            Event::Print(ps) => s.push_str(&format!("{}\n", ps)),
            Event::Warning(ws) => s.push_str(&format!("WARNING: {}\n", ws)),
            Event::Errors(error) => s.push_str(&format!("?{}\n", error)),
            Event::Input(name) => s.push_str(&format!("{}? ", name)),
            Event::Idle | Event::Running | Event::Jumped(_) | Event::Finished => {}
        }
    }
    s
}
