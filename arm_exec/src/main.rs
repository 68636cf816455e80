//! # Arm Control Executable
//!
//! This executable drives the two-joint drawing arm:
//! - Reads single byte commands from the input channel
//! - Draws the commanded line one unit step at a time
//! - Solves each step into joint angles and actuates the servos
//!
//! # Architecture
//!
//! The execution methodology consists of:
//!
//!     - Early initialisation: session, parameters, logging
//!     - Equipment initialisation: input channel, servos, feedback, tracing
//!     - Homing
//!     - Main loop:
//!         - Block until a command byte arrives
//!         - Run the command's trajectory to completion
//!
//! There is only ever one trajectory in flight. Bytes arriving while a line is
//! being drawn wait in the input channel's buffer.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info, warn};
use std::{io::Read, path::PathBuf};
use structopt::StructOpt;

// Internal
use arm_lib::{
    arm_ctrl::{self, Actuator, ArmCtrl, MoveOutcome},
    cmd_processor::CmdProcessor,
    cmd_source::CmdSource,
    feedback::{Feedback, FeedbackKind, LogFeedback, NoFeedback},
    params::{ArmExecParams, DriverKind, InputKind},
    servo_ctrl::{ServoCtrl, SimServoDriver},
    trace::{ArchiveTracer, LogTracer, MoveTracer, NoTrace, TraceKind},
};
use util::{
    archive::Archiver,
    logger::{logger_init, parse_level},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CLI
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "arm_exec", about = "Drawing arm motion control")]
struct Opt {
    /// Directory holding `arm_ctrl.toml` and `arm_exec.toml`. Defaults to
    /// `$DRAWBOT_SW_ROOT/params`.
    #[structopt(long, parse(from_os_str))]
    params_dir: Option<PathBuf>,

    /// Use the simulated servo driver whatever the parameters say.
    #[structopt(long)]
    sim: bool,

    /// Read commands from stdin whatever the parameters say.
    #[structopt(long)]
    stdin: bool,

    /// Override the log level from the parameters.
    #[structopt(long)]
    log_level: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let params_dir = match opt.params_dir {
        Some(ref d) => d.clone(),
        None => util::params::params_dir().wrap_err("Failed to find the parameter directory")?,
    };

    let arm_params: arm_ctrl::Params = util::params::load_from_path(params_dir.join("arm_ctrl.toml"))
        .wrap_err("Could not load arm control params")?;
    let exec_params: ArmExecParams = util::params::load_from_path(params_dir.join("arm_exec.toml"))
        .wrap_err("Could not load exec params")?;

    // Initialise logger
    let log_level = parse_level(opt.log_level.as_deref().unwrap_or(&exec_params.log_level))
        .wrap_err("Invalid log level")?;
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Drawing Arm Control Executable\n");
    info!("Session directory: {:?}", session.session_root);
    info!("Parameters loaded from {:?}\n", params_dir);

    info!("Initialising...");

    // ---- EQUIPMENT INITIALISATION ----

    let mut source = CmdSource::new(
        open_input(&exec_params, opt.stdin).wrap_err("Failed to open the input channel")?,
    );
    info!("Input channel open");

    let actuator =
        open_actuator(&exec_params, opt.sim).wrap_err("Failed to attach the servos")?;
    info!("Servos attached");

    let mut ctrl = ArmCtrl::new(&arm_params, actuator)
        .wrap_err("Failed to initialise ArmCtrl")?
        .with_feedback(open_feedback(&exec_params).wrap_err("Failed to open feedback")?)
        .with_tracer(open_tracer(&exec_params, &session).wrap_err("Failed to open tracing")?);

    let geom = ctrl.geometry();
    info!(
        "ArmCtrl init complete, reach {:.1} to {:.1} mm, floor at y = {} mm",
        geom.min_reach_mm, geom.max_reach_mm, geom.min_y_mm
    );

    // ---- HOMING ----

    match ctrl.home().wrap_err("Failed to home the arm")? {
        MoveOutcome::Reached(_) => info!("Homed to {:?}", ctrl.home_position()),
        MoveOutcome::Unreachable => warn!(
            "Home point {:?} is out of reach, the arm has not moved",
            ctrl.home_position()
        ),
    }

    let processor = CmdProcessor::new(ctrl.home_position(), arm_params.cmd_steps);

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering main loop");

    loop {
        let symbol = match source.poll().wrap_err("Failed to read the input channel")? {
            Some(s) => s,
            None => {
                info!("Input channel closed");
                break;
            }
        };

        if let Some(report) = processor
            .process_symbol(&mut ctrl, symbol)
            .wrap_err("Failed to execute command")?
        {
            debug!(
                "Command '{}' done: {} moves, {} out of reach, now at {:?}",
                symbol as char,
                report.num_moves,
                report.num_unreachable,
                ctrl.position()
            );
        }
    }

    info!("Exiting, final status: {:?}", ctrl.report());

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// EQUIPMENT
// ------------------------------------------------------------------------------------------------

/// Open the command input channel.
fn open_input(params: &ArmExecParams, force_stdin: bool) -> Result<Box<dyn Read>> {
    if force_stdin || params.input == InputKind::Stdin {
        return Ok(Box::new(std::io::stdin()));
    }

    open_uart(params)
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn open_uart(params: &ArmExecParams) -> Result<Box<dyn Read>> {
    let uart = arm_lib::cmd_source::UartReader::new(params.uart_baud_rate)
        .wrap_err("Failed to open the UART")?;
    info!("UART open at {} baud", params.uart_baud_rate);

    Ok(Box::new(uart))
}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn open_uart(_params: &ArmExecParams) -> Result<Box<dyn Read>> {
    warn!("UART input is only available on the Raspberry Pi, reading from stdin");

    Ok(Box::new(std::io::stdin()))
}

/// Attach the servo driver.
fn open_actuator(params: &ArmExecParams, force_sim: bool) -> Result<Box<dyn Actuator>> {
    if force_sim || params.driver == DriverKind::Sim {
        return open_sim_actuator(params);
    }

    open_pca9685_actuator(params)
}

fn open_sim_actuator(params: &ArmExecParams) -> Result<Box<dyn Actuator>> {
    info!("Using the simulated servo driver");

    Ok(Box::new(ServoCtrl::new(
        SimServoDriver::default(),
        params.shoulder_servo.clone(),
        params.elbow_servo.clone(),
    )?))
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn open_pca9685_actuator(params: &ArmExecParams) -> Result<Box<dyn Actuator>> {
    use pwm_pca9685::{Address, Pca9685};
    use rppal::i2c::I2c;

    let i2c = I2c::new().wrap_err("Failed to open the I2C bus")?;

    let mut pca = Pca9685::new(i2c, Address::from(params.pca9685_address))
        .map_err(|e| eyre!("Failed to open the PCA9685: {:?}", e))?;
    pca.set_prescale(params.pca9685_prescale)
        .map_err(|e| eyre!("Failed to set the PCA9685 prescale: {:?}", e))?;
    pca.enable()
        .map_err(|e| eyre!("Failed to enable the PCA9685: {:?}", e))?;

    info!("PCA9685 at address {:#04x}", params.pca9685_address);

    Ok(Box::new(ServoCtrl::new(
        pca,
        params.shoulder_servo.clone(),
        params.elbow_servo.clone(),
    )?))
}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn open_pca9685_actuator(params: &ArmExecParams) -> Result<Box<dyn Actuator>> {
    warn!("The PCA9685 driver is only available on the Raspberry Pi");

    open_sim_actuator(params)
}

/// Open the feedback channel.
fn open_feedback(params: &ArmExecParams) -> Result<Box<dyn Feedback>> {
    let feedback: Box<dyn Feedback> = match params.feedback {
        FeedbackKind::None => Box::new(NoFeedback),
        FeedbackKind::Log => Box::new(LogFeedback),
        FeedbackKind::Buzzer => open_buzzer(params)?,
    };

    Ok(feedback)
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn open_buzzer(params: &ArmExecParams) -> Result<Box<dyn Feedback>> {
    let buzzer = arm_lib::feedback::BuzzerFeedback::new(params.buzzer.clone())
        .wrap_err("Failed to open the buzzer")?;

    Ok(Box::new(buzzer))
}

#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn open_buzzer(_params: &ArmExecParams) -> Result<Box<dyn Feedback>> {
    warn!("The buzzer is only available on the Raspberry Pi, logging feedback instead");

    Ok(Box::new(LogFeedback))
}

/// Open the move tracer.
fn open_tracer(params: &ArmExecParams, session: &Session) -> Result<Box<dyn MoveTracer>> {
    let tracer: Box<dyn MoveTracer> = match params.trace {
        TraceKind::None => Box::new(NoTrace),
        TraceKind::Log => Box::new(LogTracer),
        TraceKind::Archive => {
            let archiver = Archiver::from_path(session, "moves.csv")
                .map_err(|e| eyre!("Failed to create the move archive: {}", e))?;
            info!("Archiving moves to {:?}", session.arch_root.join("moves.csv"));
            Box::new(ArchiveTracer::new(archiver))
        }
    };

    Ok(tracer)
}
