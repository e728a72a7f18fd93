//! FFI bindings to HiGHS solver library.
//!
//! This module contains all unsafe code in the crate. Every call checks the
//! slice lengths it hands to HiGHS and returns [`STATUS_ERROR`] without
//! calling through when they disagree with the counts passed alongside.
#![allow(unsafe_code)]

use crate::lp::HighsLp;
use std::ffi::{CStr, c_char, c_void};
use std::ptr::{self, NonNull};

pub use highs_sys::HighsInt;

pub(crate) const STATUS_OK: HighsInt = highs_sys::STATUS_OK;
pub(crate) const STATUS_ERROR: HighsInt = -1;

/// Size of the buffer handed to `Highs_getStringOptionValue`, matching
/// HiGHS's `kHighsMaximumStringLength` (terminator included).
const STRING_OPTION_CAPACITY: usize = 512;

/// Owned pointer to a HiGHS instance. Dropping it calls `Highs_destroy`.
pub(crate) struct RawHighs {
    ptr: NonNull<c_void>,
}

// A HiGHS instance has no thread affinity; it only must not be shared.
unsafe impl Send for RawHighs {}

fn count(len: usize) -> Option<HighsInt> {
    HighsInt::try_from(len).ok()
}

impl RawHighs {
    /// Allocate a new instance, or `None` if HiGHS returns null.
    pub(crate) fn create() -> Option<Self> {
        let ptr = unsafe { highs_sys::Highs_create() };
        NonNull::new(ptr).map(|ptr| RawHighs { ptr })
    }

    fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    pub(crate) fn num_col(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumCol(self.as_ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub(crate) fn num_row(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumRow(self.as_ptr()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub(crate) fn add_cols(&mut self, costs: &[f64], lower: &[f64], upper: &[f64]) -> HighsInt {
        let Some(num_new_col) = count(costs.len()) else {
            return STATUS_ERROR;
        };
        if lower.len() != costs.len() || upper.len() != costs.len() {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_addCols(
                self.as_ptr(),
                num_new_col,
                costs.as_ptr(),
                lower.as_ptr(),
                upper.as_ptr(),
                0,
                ptr::null(),
                ptr::null(),
                ptr::null(),
            )
        }
    }

    pub(crate) fn add_rows(
        &mut self,
        lower: &[f64],
        upper: &[f64],
        starts: &[HighsInt],
        indices: &[HighsInt],
        values: &[f64],
    ) -> HighsInt {
        let (Some(num_new_row), Some(num_new_nz)) = (count(lower.len()), count(values.len()))
        else {
            return STATUS_ERROR;
        };
        if upper.len() != lower.len()
            || starts.len() != lower.len()
            || indices.len() != values.len()
        {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_addRows(
                self.as_ptr(),
                num_new_row,
                lower.as_ptr(),
                upper.as_ptr(),
                num_new_nz,
                starts.as_ptr(),
                indices.as_ptr(),
                values.as_ptr(),
            )
        }
    }

    /// Replace the incumbent model with `lp` (`Highs_passLp` / `Highs_passMip`).
    pub(crate) fn pass_model(&mut self, lp: &HighsLp<'_>) -> HighsInt {
        if !lp.is_consistent() {
            return STATUS_ERROR;
        }
        let problem = lp.problem;
        match lp.integrality.as_deref() {
            Some(integrality) => unsafe {
                highs_sys::Highs_passMip(
                    self.as_ptr(),
                    lp.num_col,
                    lp.num_row,
                    lp.num_nz,
                    lp.a_format,
                    lp.sense,
                    problem.offset(),
                    problem.costs().as_ptr(),
                    problem.column_lower_bounds().as_ptr(),
                    problem.column_upper_bounds().as_ptr(),
                    problem.row_lower_bounds().as_ptr(),
                    problem.row_upper_bounds().as_ptr(),
                    lp.a_start.as_ptr(),
                    lp.a_index.as_ptr(),
                    problem.matrix().values().as_ptr(),
                    integrality.as_ptr(),
                )
            },
            None => unsafe {
                highs_sys::Highs_passLp(
                    self.as_ptr(),
                    lp.num_col,
                    lp.num_row,
                    lp.num_nz,
                    lp.a_format,
                    lp.sense,
                    problem.offset(),
                    problem.costs().as_ptr(),
                    problem.column_lower_bounds().as_ptr(),
                    problem.column_upper_bounds().as_ptr(),
                    problem.row_lower_bounds().as_ptr(),
                    problem.row_upper_bounds().as_ptr(),
                    lp.a_start.as_ptr(),
                    lp.a_index.as_ptr(),
                    problem.matrix().values().as_ptr(),
                )
            },
        }
    }

    pub(crate) fn run(&mut self) -> HighsInt {
        unsafe { highs_sys::Highs_run(self.as_ptr()) }
    }

    pub(crate) fn model_status(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getModelStatus(self.as_ptr()) }
    }

    pub(crate) fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.as_ptr()) }
    }

    pub(crate) fn infinity(&self) -> f64 {
        unsafe { highs_sys::Highs_getInfinity(self.as_ptr()) }
    }

    pub(crate) fn solution(
        &self,
        col_value: &mut [f64],
        col_dual: &mut [f64],
        row_value: &mut [f64],
        row_dual: &mut [f64],
    ) -> HighsInt {
        let (num_col, num_row) = (self.num_col(), self.num_row());
        if col_value.len() != num_col
            || col_dual.len() != num_col
            || row_value.len() != num_row
            || row_dual.len() != num_row
        {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_getSolution(
                self.as_ptr(),
                col_value.as_mut_ptr(),
                col_dual.as_mut_ptr(),
                row_value.as_mut_ptr(),
                row_dual.as_mut_ptr(),
            )
        }
    }

    pub(crate) fn basis(&self, col_status: &mut [HighsInt], row_status: &mut [HighsInt]) -> HighsInt {
        if col_status.len() != self.num_col() || row_status.len() != self.num_row() {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_getBasis(
                self.as_ptr(),
                col_status.as_mut_ptr(),
                row_status.as_mut_ptr(),
            )
        }
    }

    /// Declared type code of an option, or `None` if HiGHS does not know it.
    pub(crate) fn option_type(&self, name: &CStr) -> Option<HighsInt> {
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getOptionType(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub(crate) fn set_bool_option(&mut self, name: &CStr, value: bool) -> HighsInt {
        unsafe {
            highs_sys::Highs_setBoolOptionValue(self.as_ptr(), name.as_ptr(), HighsInt::from(value))
        }
    }

    pub(crate) fn set_int_option(&mut self, name: &CStr, value: HighsInt) -> HighsInt {
        unsafe { highs_sys::Highs_setIntOptionValue(self.as_ptr(), name.as_ptr(), value) }
    }

    pub(crate) fn set_double_option(&mut self, name: &CStr, value: f64) -> HighsInt {
        unsafe { highs_sys::Highs_setDoubleOptionValue(self.as_ptr(), name.as_ptr(), value) }
    }

    pub(crate) fn set_string_option(&mut self, name: &CStr, value: &CStr) -> HighsInt {
        unsafe {
            highs_sys::Highs_setStringOptionValue(self.as_ptr(), name.as_ptr(), value.as_ptr())
        }
    }

    pub(crate) fn bool_option(&self, name: &CStr) -> Option<bool> {
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getBoolOptionValue(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value != 0)
    }

    pub(crate) fn int_option(&self, name: &CStr) -> Option<HighsInt> {
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntOptionValue(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub(crate) fn double_option(&self, name: &CStr) -> Option<f64> {
        let mut value: f64 = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleOptionValue(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub(crate) fn string_option(&self, name: &CStr) -> Option<String> {
        let mut buffer = vec![0u8; STRING_OPTION_CAPACITY];
        let status = unsafe {
            highs_sys::Highs_getStringOptionValue(
                self.as_ptr(),
                name.as_ptr(),
                buffer.as_mut_ptr().cast::<c_char>(),
            )
        };
        if status != STATUS_OK {
            return None;
        }
        CStr::from_bytes_until_nul(&buffer)
            .ok()
            .map(|value| value.to_string_lossy().into_owned())
    }

    pub(crate) fn int_info(&self, name: &CStr) -> Option<HighsInt> {
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub(crate) fn double_info(&self, name: &CStr) -> Option<f64> {
        let mut value: f64 = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.as_ptr(), name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub(crate) fn change_col_integrality(&mut self, col: HighsInt, integrality: HighsInt) -> HighsInt {
        unsafe { highs_sys::Highs_changeColIntegrality(self.as_ptr(), col, integrality) }
    }

    /// `from` and `to` are inclusive, as in the C API.
    pub(crate) fn change_cols_integrality_by_range(
        &mut self,
        from: HighsInt,
        to: HighsInt,
        integrality: &[HighsInt],
    ) -> HighsInt {
        let expected = i64::from(to) - i64::from(from) + 1;
        if from > to || i64::try_from(integrality.len()) != Ok(expected) {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_changeColsIntegralityByRange(
                self.as_ptr(),
                from,
                to,
                integrality.as_ptr(),
            )
        }
    }

    pub(crate) fn change_cols_integrality_by_mask(
        &mut self,
        mask: &[HighsInt],
        integrality: &[HighsInt],
    ) -> HighsInt {
        let num_col = self.num_col();
        if mask.len() != num_col || integrality.len() != num_col {
            return STATUS_ERROR;
        }
        unsafe {
            highs_sys::Highs_changeColsIntegralityByMask(
                self.as_ptr(),
                mask.as_ptr(),
                integrality.as_ptr(),
            )
        }
    }

    pub(crate) fn change_objective_sense(&mut self, sense: HighsInt) -> HighsInt {
        unsafe { highs_sys::Highs_changeObjectiveSense(self.as_ptr(), sense) }
    }

    pub(crate) fn objective_sense(&self) -> Option<HighsInt> {
        let mut value: HighsInt = 0;
        let status =
            unsafe { highs_sys::Highs_getObjectiveSense(self.as_ptr(), &raw mut value) };
        (status == STATUS_OK).then_some(value)
    }
}

impl Drop for RawHighs {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.as_ptr()) }
    }
}

/// Output buffers for [`lp_call`], sized from the problem.
pub(crate) struct LpCallBuffers {
    pub(crate) col_value: Vec<f64>,
    pub(crate) col_dual: Vec<f64>,
    pub(crate) row_value: Vec<f64>,
    pub(crate) row_dual: Vec<f64>,
    pub(crate) col_basis: Vec<HighsInt>,
    pub(crate) row_basis: Vec<HighsInt>,
    pub(crate) model_status: HighsInt,
}

impl LpCallBuffers {
    pub(crate) fn new(num_col: usize, num_row: usize) -> Self {
        LpCallBuffers {
            col_value: vec![0.0; num_col],
            col_dual: vec![0.0; num_col],
            row_value: vec![0.0; num_row],
            row_dual: vec![0.0; num_row],
            col_basis: vec![0; num_col],
            row_basis: vec![0; num_row],
            model_status: 0,
        }
    }

    fn fits(&self, lp: &HighsLp<'_>) -> bool {
        let (num_col, num_row) = (lp.problem.num_columns(), lp.problem.num_rows());
        self.col_value.len() == num_col
            && self.col_dual.len() == num_col
            && self.col_basis.len() == num_col
            && self.row_value.len() == num_row
            && self.row_dual.len() == num_row
            && self.row_basis.len() == num_row
    }
}

/// Output buffers for [`mip_call`]. HiGHS returns no duals or basis for a MIP.
pub(crate) struct MipCallBuffers {
    pub(crate) col_value: Vec<f64>,
    pub(crate) row_value: Vec<f64>,
    pub(crate) model_status: HighsInt,
}

impl MipCallBuffers {
    pub(crate) fn new(num_col: usize, num_row: usize) -> Self {
        MipCallBuffers {
            col_value: vec![0.0; num_col],
            row_value: vec![0.0; num_row],
            model_status: 0,
        }
    }
}

/// One-shot `Highs_lpCall`. Returns the run status.
pub(crate) fn lp_call(lp: &HighsLp<'_>, out: &mut LpCallBuffers) -> HighsInt {
    if !lp.is_consistent() || !out.fits(lp) {
        return STATUS_ERROR;
    }
    let problem = lp.problem;
    unsafe {
        highs_sys::Highs_lpCall(
            lp.num_col,
            lp.num_row,
            lp.num_nz,
            lp.a_format,
            lp.sense,
            problem.offset(),
            problem.costs().as_ptr(),
            problem.column_lower_bounds().as_ptr(),
            problem.column_upper_bounds().as_ptr(),
            problem.row_lower_bounds().as_ptr(),
            problem.row_upper_bounds().as_ptr(),
            lp.a_start.as_ptr(),
            lp.a_index.as_ptr(),
            problem.matrix().values().as_ptr(),
            out.col_value.as_mut_ptr(),
            out.col_dual.as_mut_ptr(),
            out.row_value.as_mut_ptr(),
            out.row_dual.as_mut_ptr(),
            out.col_basis.as_mut_ptr(),
            out.row_basis.as_mut_ptr(),
            &raw mut out.model_status,
        )
    }
}

/// One-shot `Highs_mipCall`. Returns the run status.
pub(crate) fn mip_call(lp: &HighsLp<'_>, out: &mut MipCallBuffers) -> HighsInt {
    let Some(integrality) = lp.integrality.as_deref() else {
        return STATUS_ERROR;
    };
    if !lp.is_consistent()
        || out.col_value.len() != lp.problem.num_columns()
        || out.row_value.len() != lp.problem.num_rows()
    {
        return STATUS_ERROR;
    }
    let problem = lp.problem;
    unsafe {
        highs_sys::Highs_mipCall(
            lp.num_col,
            lp.num_row,
            lp.num_nz,
            lp.a_format,
            lp.sense,
            problem.offset(),
            problem.costs().as_ptr(),
            problem.column_lower_bounds().as_ptr(),
            problem.column_upper_bounds().as_ptr(),
            problem.row_lower_bounds().as_ptr(),
            problem.row_upper_bounds().as_ptr(),
            lp.a_start.as_ptr(),
            lp.a_index.as_ptr(),
            problem.matrix().values().as_ptr(),
            integrality.as_ptr(),
            out.col_value.as_mut_ptr(),
            out.row_value.as_mut_ptr(),
            &raw mut out.model_status,
        )
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}
