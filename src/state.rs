//! Wizard State Machine
//!
//! Holds everything the user picks while walking through the wizard and
//! decides whether the next screen may be shown. Toolkit-free so the whole
//! flow can be tested without a display.
//!
//! `Welcome -> SelectInputFormat -> SelectOutput -> Converting -> Result -> Welcome`

use crate::converter::{ConversionRequest, ConversionResult, TargetFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Wizard screens, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Welcome,
    SelectInputFormat,
    SelectOutput,
    Converting,
    Result,
}

impl WizardStep {
    /// Screen shown after this one when its prerequisites hold
    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::Welcome => WizardStep::SelectInputFormat,
            WizardStep::SelectInputFormat => WizardStep::SelectOutput,
            WizardStep::SelectOutput => WizardStep::Converting,
            WizardStep::Converting => WizardStep::Result,
            WizardStep::Result => WizardStep::Welcome,
        }
    }
}

/// Reasons the wizard refuses to move on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Select the input folder first!")]
    MissingInput,

    #[error("Select or create the output folder first!")]
    MissingOutput,

    #[error("Invalid folder name.")]
    InvalidFolderName,

    #[error("A conversion is already running.")]
    ConversionRunning,
}

/// User selections collected across the wizard screens
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    step: WizardStep,
    input_directory: Option<PathBuf>,
    target_format: TargetFormat,
    output_directory: Option<PathBuf>,
    outcome: Option<ConversionResult>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn input_directory(&self) -> Option<&Path> {
        self.input_directory.as_deref()
    }

    /// `None` (a cancelled picker) clears the previous choice
    pub fn set_input_directory(&mut self, dir: Option<PathBuf>) {
        self.input_directory = dir.filter(|d| !d.as_os_str().is_empty());
    }

    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    pub fn set_target_format(&mut self, format: TargetFormat) {
        self.target_format = format;
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }

    /// `None` (a cancelled picker) clears the previous choice
    pub fn set_output_directory(&mut self, dir: Option<PathBuf>) {
        self.output_directory = dir.filter(|d| !d.as_os_str().is_empty());
    }

    /// Use `base/name` as the output folder
    ///
    /// A cancelled base picker just clears the output. An empty or cancelled
    /// name clears it as well and is reported back as an error. The folder
    /// itself is created later, by the converter.
    pub fn create_output_subfolder(
        &mut self,
        base: Option<PathBuf>,
        name: Option<&str>,
    ) -> Result<(), WizardError> {
        let Some(base) = base.filter(|b| !b.as_os_str().is_empty()) else {
            self.output_directory = None;
            return Ok(());
        };

        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                self.output_directory = Some(base.join(name));
                Ok(())
            }
            None => {
                self.output_directory = None;
                Err(WizardError::InvalidFolderName)
            }
        }
    }

    /// A conversion can only start once an input folder is known
    pub fn can_start(&self) -> bool {
        self.input_directory.is_some()
    }

    /// Move to the next screen if its prerequisites hold
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::SelectInputFormat if !self.can_start() => {
                return Err(WizardError::MissingInput)
            }
            WizardStep::SelectOutput if self.output_directory.is_none() => {
                return Err(WizardError::MissingOutput)
            }
            WizardStep::Converting => return Err(WizardError::ConversionRunning),
            _ => {}
        }

        self.step = self.step.next();
        Ok(self.step)
    }

    /// Build the request for the conversion screen
    pub fn conversion_request(&self) -> Result<ConversionRequest, WizardError> {
        let input = self.input_directory.clone().ok_or(WizardError::MissingInput)?;
        let output = self
            .output_directory
            .clone()
            .ok_or(WizardError::MissingOutput)?;
        Ok(ConversionRequest::new(input, output, self.target_format))
    }

    /// Record the worker's outcome and show the result screen
    pub fn finish(&mut self, result: ConversionResult) -> WizardStep {
        self.outcome = Some(result);
        self.step = WizardStep::Result;
        self.step
    }

    /// Outcome of the most recent conversion
    pub fn outcome(&self) -> Option<&ConversionResult> {
        self.outcome.as_ref()
    }
}
