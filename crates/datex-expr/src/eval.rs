//! The evaluator: turns an [`Expr`] plus a [`Window`] into a lazy,
//! fallible, non-decreasing stream of dates.
//!
//! Every iterator returned from this module is *fused on error*: once it
//! yields `Err`, every subsequent call to `next` returns `None`. Filters
//! and maps built on top of such an iterator inherit that property for
//! free, so a single `Err` anywhere in a tree terminates the whole
//! evaluation.

use std::iter::Peekable;

use datex_core::errors::{Error, Result};
use datex_time::{Calendar, Date, Tenor};

use crate::expr::{Bound, Expr, SliceRange};
use crate::window::Window;

/// A lazy, fallible stream of dates produced by evaluating an [`Expr`].
pub type DateIter<'a> = Box<dyn Iterator<Item = Result<Date>> + 'a>;

/// Evaluate `expr` over `window`, returning a lazy iterator of dates in
/// non-decreasing order.
pub fn evaluate<'a>(expr: &'a Expr, window: &Window) -> DateIter<'a> {
    match expr {
        Expr::Const(d) => {
            let d = *d;
            let lo = window.lower();
            let hi = window.upper();
            if d >= lo && d <= hi {
                Box::new(std::iter::once(Ok(d)))
            } else {
                Box::new(std::iter::empty())
            }
        }
        Expr::Seq(dates) => {
            let lo = window.lower();
            let hi = window.upper();
            let dates = dates.clone();
            Box::new(
                (0..dates.len())
                    .map(move |i| dates[i])
                    .filter(move |d| *d >= lo && *d <= hi)
                    .map(Ok),
            )
        }
        Expr::Days => leaf(window, Tenor::days(1), anchor_days),
        Expr::Weeks => leaf(window, Tenor::weeks(1), anchor_weeks),
        Expr::Months => leaf(window, Tenor::months(1), anchor_months),
        Expr::Years => leaf(window, Tenor::years(1), anchor_years),
        Expr::Weekdays(g) => {
            let cal = window.calendar.clone();
            Box::new(evaluate(g, window).filter_map(move |r| match r {
                Err(e) => Some(Err(e)),
                Ok(d) if !cal.is_weekend_day(d.weekday()) => Some(Ok(d)),
                Ok(_) => None,
            }))
        }
        Expr::Weekends(g) => {
            let cal = window.calendar.clone();
            Box::new(evaluate(g, window).filter_map(move |r| match r {
                Err(e) => Some(Err(e)),
                Ok(d) if cal.is_weekend_day(d.weekday()) => Some(Ok(d)),
                Ok(_) => None,
            }))
        }
        Expr::BusinessDays(g, cal_override) => {
            let cal = cal_override.clone().unwrap_or_else(|| window.calendar.clone());
            Box::new(evaluate(g, window).filter_map(move |r| match r {
                Err(e) => Some(Err(e)),
                Ok(d) if cal.is_business_day(d) => Some(Ok(d)),
                Ok(_) => None,
            }))
        }
        Expr::AddTenor(g, t) => {
            let t = *t;
            let cal = window.calendar.clone();
            let after = widen_bound(window.after, &t, cal.as_ref(), true);
            let before = widen_bound(window.before, &t, cal.as_ref(), true);
            let child_window = window.with_propagated(after, before);
            let cal2 = window.calendar.clone();
            Box::new(
                evaluate(g, &child_window).map(move |r| r.and_then(|d| t.add_to(d, Some(cal2.as_ref())))),
            )
        }
        Expr::SubTenor(g, t) => {
            let t = *t;
            let cal = window.calendar.clone();
            let after = widen_bound(window.after, &t, cal.as_ref(), false);
            let before = widen_bound(window.before, &t, cal.as_ref(), false);
            let child_window = window.with_propagated(after, before);
            let cal2 = window.calendar.clone();
            Box::new(
                evaluate(g, &child_window).map(move |r| r.and_then(|d| t.sub_from(d, Some(cal2.as_ref())))),
            )
        }
        Expr::After(g, bound) => narrowed_comparison(
            g,
            bound,
            window,
            |b, w| w.with_propagated(w.after.max(b), w.before),
            |d, b| d > b,
        ),
        Expr::AfterOrOn(g, bound) => narrowed_comparison(
            g,
            bound,
            window,
            |b, w| w.with_propagated(w.after.max(b), w.before),
            |d, b| d >= b,
        ),
        Expr::Before(g, bound) => narrowed_comparison(
            g,
            bound,
            window,
            |b, w| w.with_propagated(w.after, w.before.min(b)),
            |d, b| d < b,
        ),
        Expr::BeforeOrOn(g, bound) => narrowed_comparison(
            g,
            bound,
            window,
            |b, w| w.with_propagated(w.after, w.before.min(b)),
            |d, b| d <= b,
        ),
        Expr::Join(a, b) => Box::new(JoinIter {
            a: evaluate(a, window).peekable(),
            b: evaluate(b, window).peekable(),
            errored: false,
        }),
        Expr::Meet(a, b) => Box::new(MeetIter {
            a: evaluate(a, window).peekable(),
            b: evaluate(b, window).peekable(),
            errored: false,
        }),
        Expr::Diff(a, b) => Box::new(DiffIter {
            a: evaluate(a, window).peekable(),
            b: evaluate(b, window).peekable(),
            errored: false,
        }),
        Expr::Slice(g, range) => eval_slice(g, range, window),
        Expr::SubSequence(outer, inner, slice) => eval_subsequence(outer, inner, slice, window),
        Expr::RollFwd(g, cal_override) => {
            let cal = cal_override.clone().unwrap_or_else(|| window.calendar.clone());
            Box::new(evaluate(g, window).map(move |r| r.map(|d| cal.roll_fwd(d))))
        }
        Expr::RollBwd(g, cal_override) => {
            let cal = cal_override.clone().unwrap_or_else(|| window.calendar.clone());
            Box::new(evaluate(g, window).map(move |r| r.map(|d| cal.roll_bwd(d))))
        }
    }
}

/// Evaluate `expr` over `window`, eagerly collecting every date (or the
/// first error). Convenient for tests and small, known-bounded windows;
/// avoid on unbounded or very wide windows.
pub fn collect(expr: &Expr, window: &Window) -> Result<Vec<Date>> {
    evaluate(expr, window).collect()
}

fn leaf<'a>(window: &Window, step: Tenor, anchor: impl Fn(Date) -> Result<Date>) -> DateIter<'a> {
    if window.is_unbounded() {
        return Box::new(std::iter::once(Err(Error::UnboundedWindow(
            "leaf generator has neither a start/after nor an end/before bound".to_string(),
        ))));
    }
    let lo = window.lower();
    let hi = window.upper();
    let start = match anchor(lo) {
        Ok(d) => d,
        Err(e) => return Box::new(std::iter::once(Err(e))),
    };
    Box::new(Stepped {
        next: if start <= hi { Some(start) } else { None },
        step,
        hi,
    })
}

fn anchor_days(lo: Date) -> Result<Date> {
    Ok(lo)
}

fn anchor_weeks(lo: Date) -> Result<Date> {
    let idx = lo.weekday().index() as i64;
    Ok(if idx == 0 { lo } else { lo.add_days(7 - idx) })
}

fn anchor_months(lo: Date) -> Result<Date> {
    Ok(if lo.day() == 1 {
        lo
    } else {
        lo.start_of_month().add_months(1)
    })
}

fn anchor_years(lo: Date) -> Result<Date> {
    if lo.month() == 1 && lo.day() == 1 {
        Ok(lo)
    } else {
        Date::from_ymd(lo.year() + 1, 1, 1)
    }
}

struct Stepped {
    next: Option<Date>,
    step: Tenor,
    hi: Date,
}

impl Iterator for Stepped {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        let cur = self.next?;
        if cur > self.hi {
            self.next = None;
            return None;
        }
        match self.step.add_to(cur, None) {
            Ok(nxt) => self.next = Some(nxt),
            Err(e) => {
                self.next = None;
                return Some(Err(e));
            }
        }
        Some(Ok(cur))
    }
}

/// Widen a propagated bound to account for an `AddTenor`/`SubTenor` shift,
/// so the child is asked for enough elements to not under-generate at
/// either edge. Both `add` and the dual `sub` direction always widen both
/// bounds unconditionally (rather than gating on the sign of `t`): any
/// extra candidates this pulls in are harmless, since `After`/`Before`
/// combinators always re-filter the final output against the true window.
fn widen_bound(bound: Date, t: &Tenor, cal: &dyn Calendar, is_add: bool) -> Date {
    if bound.is_sentinel() {
        return bound;
    }
    let result = if is_add {
        t.sub_from(bound, Some(cal))
    } else {
        t.add_to(bound, Some(cal))
    };
    result.expect("window always carries a calendar, so tenor arithmetic cannot fail here")
}

/// Resolve a comparison bound to a single date. A bound expression must
/// produce exactly one date in the window (a `Const`, or a generator that
/// happens to be singleton, e.g. an `index()`ed slice) — a bound that
/// yields two or more dates is the "comparing a generator to a stream"
/// misuse the original source's chained-comparison idiom could not guard
/// against, so it fails with `ComparisonOnStream` rather than silently
/// using the first date.
fn resolve_bound(bound: &Bound, window: &Window) -> Result<Date> {
    match bound {
        Bound::Date(d) => Ok(*d),
        Bound::Expr(e) => {
            let mut it = evaluate(e, window);
            let first = match it.next() {
                Some(r) => r?,
                None => {
                    return Err(Error::ComparisonOnStream(
                        "comparison bound generator produced no dates in the window".to_string(),
                    ))
                }
            };
            if let Some(second) = it.next() {
                second?;
                return Err(Error::ComparisonOnStream(format!(
                    "comparison bound generator produced more than one date starting at {first}; only a constant or single-date generator is a valid comparison bound"
                )));
            }
            Ok(first)
        }
    }
}

/// Resolve `bound` against `window`, narrow the window passed down to `g`
/// with `narrow` (a combinator establishing its own `after`/`before` the way
/// `AddTenor`/`SubTenor` do), then filter `g`'s output with `keep`. This is
/// what lets a bare comparison like `after(days(), some_date)` establish a
/// window on its own, rather than only post-filtering an already-unbounded
/// child.
///
/// `narrow` always uses the bound itself, not `bound +/- 1`, as the new
/// edge: a strict `After`/`Before` still needs its child to enumerate the
/// bound date itself (e.g. a nested `Slice` indexes from that date), so the
/// boundary is left inclusive going down and `keep` alone enforces
/// strictness on the way back up. Same tradeoff as `widen_bound`: one extra
/// candidate at the edge is always re-filtered, never wrong.
fn narrowed_comparison<'a>(
    g: &'a Expr,
    bound: &Bound,
    window: &Window,
    narrow: impl FnOnce(Date, &Window) -> Window,
    keep: impl Fn(Date, Date) -> bool + 'a,
) -> DateIter<'a> {
    match resolve_bound(bound, window) {
        Ok(b) => {
            let child_window = narrow(b, window);
            comparison(evaluate(g, &child_window), b, keep)
        }
        Err(e) => Box::new(std::iter::once(Err(e))),
    }
}

fn comparison<'a>(inner: DateIter<'a>, bound: Date, keep: impl Fn(Date, Date) -> bool + 'a) -> DateIter<'a> {
    Box::new(inner.filter_map(move |r| match r {
        Err(e) => Some(Err(e)),
        Ok(d) if keep(d, bound) => Some(Ok(d)),
        Ok(_) => None,
    }))
}

struct JoinIter<'a> {
    a: Peekable<DateIter<'a>>,
    b: Peekable<DateIter<'a>>,
    errored: bool,
}

impl<'a> Iterator for JoinIter<'a> {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        if self.errored {
            return None;
        }
        let result = match (self.a.peek(), self.b.peek()) {
            (None, None) => return None,
            (Some(_), None) => self.a.next(),
            (None, Some(_)) => self.b.next(),
            (Some(Err(_)), _) => self.a.next(),
            (_, Some(Err(_))) => self.b.next(),
            (Some(Ok(x)), Some(Ok(y))) => {
                if x == y {
                    self.a.next();
                    self.b.next()
                } else if x < y {
                    self.a.next()
                } else {
                    self.b.next()
                }
            }
        };
        if matches!(result, Some(Err(_))) {
            self.errored = true;
        }
        result
    }
}

struct MeetIter<'a> {
    a: Peekable<DateIter<'a>>,
    b: Peekable<DateIter<'a>>,
    errored: bool,
}

impl<'a> Iterator for MeetIter<'a> {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        if self.errored {
            return None;
        }
        loop {
            match (self.a.peek(), self.b.peek()) {
                (None, _) | (_, None) => return None,
                (Some(Err(_)), _) => {
                    self.errored = true;
                    return self.a.next();
                }
                (_, Some(Err(_))) => {
                    self.errored = true;
                    return self.b.next();
                }
                (Some(Ok(x)), Some(Ok(y))) => {
                    if x == y {
                        self.b.next();
                        return self.a.next();
                    } else if x < y {
                        self.a.next();
                    } else {
                        self.b.next();
                    }
                }
            }
        }
    }
}

struct DiffIter<'a> {
    a: Peekable<DateIter<'a>>,
    b: Peekable<DateIter<'a>>,
    errored: bool,
}

impl<'a> Iterator for DiffIter<'a> {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        if self.errored {
            return None;
        }
        loop {
            match self.a.peek() {
                None => return None,
                Some(Err(_)) => {
                    self.errored = true;
                    return self.a.next();
                }
                Some(Ok(x)) => {
                    let x = *x;
                    match self.b.peek() {
                        Some(Err(_)) => {
                            self.errored = true;
                            return self.b.next();
                        }
                        Some(Ok(y)) if *y < x => {
                            self.b.next();
                        }
                        Some(Ok(y)) if *y == x => {
                            self.a.next();
                            self.b.next();
                        }
                        _ => return self.a.next(),
                    }
                }
            }
        }
    }
}

struct LazySlice<'a> {
    inner: DateIter<'a>,
    index: usize,
    start: usize,
    stop: Option<usize>,
    step: usize,
    errored: bool,
}

impl<'a> Iterator for LazySlice<'a> {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        if self.errored {
            return None;
        }
        loop {
            if let Some(stop) = self.stop {
                if self.index >= stop {
                    return None;
                }
            }
            match self.inner.next() {
                None => return None,
                Some(Err(e)) => {
                    self.errored = true;
                    return Some(Err(e));
                }
                Some(Ok(d)) => {
                    let idx = self.index;
                    self.index += 1;
                    if idx < self.start || (idx - self.start) % self.step != 0 {
                        continue;
                    }
                    return Some(Ok(d));
                }
            }
        }
    }
}

fn eval_slice<'a>(g: &'a Expr, range: &SliceRange, window: &Window) -> DateIter<'a> {
    if range.needs_full_materialization() {
        if window.lower() == Date::MIN || window.upper() == Date::MAX {
            return Box::new(std::iter::once(Err(Error::NegativeIndexUnbounded(
                "negative slice index requires start/after and end/before to both be bounded".to_string(),
            ))));
        }
        match collect(g, window) {
            Err(e) => Box::new(std::iter::once(Err(e))),
            Ok(items) => Box::new(python_like_slice(&items, range).into_iter().map(Ok)),
        }
    } else {
        let start = range.start.unwrap_or(0).max(0) as usize;
        let stop = range.stop.map(|s| s.max(0) as usize);
        let step = range.step.max(1) as usize;
        Box::new(LazySlice {
            inner: evaluate(g, window),
            index: 0,
            start,
            stop,
            step,
            errored: false,
        })
    }
}

fn normalize_slice(len: usize, range: &SliceRange) -> (isize, isize, isize) {
    let step = if range.step == 0 { 1 } else { range.step };
    let len_i = len as isize;
    let (lo_clamp, hi_clamp) = if step > 0 { (0, len_i) } else { (-1, len_i - 1) };
    let normalize = |v: isize| -> isize {
        let v = if v < 0 { v + len_i } else { v };
        v.clamp(lo_clamp, hi_clamp)
    };
    let start = match range.start {
        Some(s) => normalize(s),
        None => {
            if step > 0 {
                0
            } else {
                len_i - 1
            }
        }
    };
    let stop = match range.stop {
        Some(s) => normalize(s),
        None => {
            if step > 0 {
                len_i
            } else {
                -1
            }
        }
    };
    (start, stop, step)
}

fn python_like_slice(items: &[Date], range: &SliceRange) -> Vec<Date> {
    let (start, stop, step) = normalize_slice(items.len(), range);
    let mut out = Vec::new();
    let mut i = start;
    if step > 0 {
        while i < stop {
            if i >= 0 && (i as usize) < items.len() {
                out.push(items[i as usize]);
            }
            i += step;
        }
    } else {
        while i > stop {
            if i >= 0 && (i as usize) < items.len() {
                out.push(items[i as usize]);
            }
            i += step;
        }
    }
    out
}

fn eval_subsequence<'a>(
    outer: &'a Expr,
    inner: &'a Expr,
    slice: &'a Option<SliceRange>,
    window: &Window,
) -> DateIter<'a> {
    if !outer.has_subsequence_cadence() {
        return Box::new(std::iter::once(Err(Error::IllegalSubsequence(
            "sub-sequence outer generator has no cadence coarser than one day".to_string(),
        ))));
    }
    let cadence = outer.cadence().expect("checked above");
    Box::new(SubSeqIter {
        outer: evaluate(outer, window).peekable(),
        inner,
        base_window: window.clone(),
        slice: slice.clone(),
        cadence,
        current: None,
        errored: false,
    })
}

struct SubSeqIter<'a> {
    outer: Peekable<DateIter<'a>>,
    inner: &'a Expr,
    base_window: Window,
    slice: Option<SliceRange>,
    cadence: Tenor,
    current: Option<DateIter<'a>>,
    errored: bool,
}

impl<'a> Iterator for SubSeqIter<'a> {
    type Item = Result<Date>;
    fn next(&mut self) -> Option<Result<Date>> {
        if self.errored {
            return None;
        }
        loop {
            if let Some(cur) = &mut self.current {
                match cur.next() {
                    Some(Ok(d)) => return Some(Ok(d)),
                    Some(Err(e)) => {
                        self.errored = true;
                        return Some(Err(e));
                    }
                    None => self.current = None,
                }
            }
            let x = match self.outer.next() {
                None => return None,
                Some(Err(e)) => {
                    self.errored = true;
                    return Some(Err(e));
                }
                Some(Ok(x)) => x,
            };
            let y_expected = match self.cadence.add_to(x, Some(self.base_window.calendar.as_ref())) {
                Ok(v) => v,
                Err(e) => {
                    self.errored = true;
                    return Some(Err(e));
                }
            };
            if let Some(Ok(y_actual)) = self.outer.peek() {
                if *y_actual != y_expected {
                    self.errored = true;
                    return Some(Err(Error::IllegalSubsequence(format!(
                        "outer element after {x} is {y_actual}, but its cadence predicts {y_expected}"
                    ))));
                }
            }
            let sub_window = self.base_window.restricted_to(x, y_expected.add_days(-1));
            let it = evaluate(self.inner, &sub_window);
            self.current = Some(match &self.slice {
                None => it,
                Some(range) => eval_slice_on_iter(it, range, &sub_window),
            });
        }
    }
}

/// `Slice` semantics applied to an already-built child iterator, used by
/// `SubSequence` to restrict each period's inner stream.
fn eval_slice_on_iter<'a>(it: DateIter<'a>, range: &SliceRange, sub_window: &Window) -> DateIter<'a> {
    if range.needs_full_materialization() {
        match it.collect::<Result<Vec<Date>>>() {
            Err(e) => Box::new(std::iter::once(Err(e))),
            Ok(items) => Box::new(python_like_slice(&items, range).into_iter().map(Ok)),
        }
    } else {
        let _ = sub_window;
        let start = range.start.unwrap_or(0).max(0) as usize;
        let stop = range.stop.map(|s| s.max(0) as usize);
        let step = range.step.max(1) as usize;
        Box::new(LazySlice {
            inner: it,
            index: 0,
            start,
            stop,
            step,
            errored: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        after_or_on, before_or_on, business_days, days, join, meet, months, weekdays, weeks, years,
    };
    use datex_time::{Date, WeekendCalendar};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn window(start: &str, end: &str) -> Window {
        Window {
            start: Date::parse(start).unwrap(),
            end: Date::parse(end).unwrap(),
            after: Date::MIN,
            before: Date::MAX,
            calendar: Arc::new(WeekendCalendar::default()),
        }
    }

    #[test]
    fn days_enumerates_inclusive_range() {
        let w = window("2024-01-01", "2024-01-03");
        let got = collect(&days(), &w).unwrap();
        assert_eq!(
            got,
            vec![
                Date::parse("2024-01-01").unwrap(),
                Date::parse("2024-01-02").unwrap(),
                Date::parse("2024-01-03").unwrap(),
            ]
        );
    }

    #[test]
    fn weeks_start_on_or_after_lower_bound() {
        let w = window("2024-01-01", "2024-02-01");
        let got = collect(&weeks(), &w).unwrap();
        assert_eq!(got.first().unwrap(), &Date::parse("2024-01-01").unwrap());
        assert_eq!(got.last().unwrap(), &Date::parse("2024-01-29").unwrap());
    }

    #[test]
    fn months_excludes_month_start_before_lower_bound() {
        let w = window("2024-01-03", "2024-04-01");
        let got = collect(&months(), &w).unwrap();
        assert_eq!(
            got,
            vec![
                Date::parse("2024-02-01").unwrap(),
                Date::parse("2024-03-01").unwrap(),
                Date::parse("2024-04-01").unwrap(),
            ]
        );
    }

    #[test]
    fn years_excludes_year_start_before_lower_bound() {
        let w = window("2020-01-03", "2024-01-03");
        let got = collect(&years(), &w).unwrap();
        assert_eq!(
            got,
            vec![
                Date::parse("2021-01-01").unwrap(),
                Date::parse("2022-01-01").unwrap(),
                Date::parse("2023-01-01").unwrap(),
                Date::parse("2024-01-01").unwrap(),
            ]
        );
    }

    #[test]
    fn unbounded_leaf_fails() {
        let w = Window::default();
        let got = collect(&days(), &w);
        assert!(matches!(got, Err(Error::UnboundedWindow(_))));
    }

    #[test]
    fn business_days_over_explicit_calendar() {
        let w = window("2024-01-01", "2024-01-31");
        let got = collect(&business_days().over(WeekendCalendar::default()), &w).unwrap();
        assert!(got.iter().all(|d| d.weekday().index() < 5));
    }

    #[test]
    fn chained_comparison_establishes_the_window_on_its_own() {
        let lo = Date::parse("2024-01-01").unwrap();
        let hi = Date::parse("2024-01-05").unwrap();
        let expr = before_or_on(after_or_on(days(), lo), hi);
        let got = collect(&expr, &Window::default()).unwrap();
        assert_eq!(got, vec![lo, lo.add_days(1), lo.add_days(2), lo.add_days(3), hi]);
    }

    #[test]
    fn comparison_against_a_multi_date_bound_fails() {
        use crate::expr::Bound;
        let w = window("2024-01-01", "2024-01-10");
        let stream_bound = Expr::After(Box::new(days()), Bound::Date(Date::parse("2024-01-05").unwrap()));
        let expr = Expr::AfterOrOn(Box::new(days()), Bound::Expr(Box::new(stream_bound)));
        let got = collect(&expr, &w);
        assert!(matches!(got, Err(Error::ComparisonOnStream(_))));
    }

    proptest! {
        #[test]
        fn leaf_generators_are_strictly_ascending(start_offset in 0i64..3650, span in 1i64..730) {
            let start = Date::from_ymd(2000, 1, 1).unwrap().add_days(start_offset);
            let end = start.add_days(span);
            let w = Window {
                start,
                end,
                after: Date::MIN,
                before: Date::MAX,
                calendar: Arc::new(WeekendCalendar::default()),
            };
            for g in [days(), weeks(), months(), years(), weekdays(days()), business_days()] {
                let got = collect(&g, &w).unwrap();
                prop_assert!(got.windows(2).all(|p| p[0] < p[1]));
            }
        }

        #[test]
        fn join_and_meet_outputs_are_strictly_ascending(start_offset in 0i64..3650, span in 1i64..730) {
            let start = Date::from_ymd(2000, 1, 1).unwrap().add_days(start_offset);
            let end = start.add_days(span);
            let w = Window {
                start,
                end,
                after: Date::MIN,
                before: Date::MAX,
                calendar: Arc::new(WeekendCalendar::default()),
            };
            let joined = collect(&join(weekdays(days()), weeks()), &w).unwrap();
            prop_assert!(joined.windows(2).all(|p| p[0] < p[1]));
            let met = collect(&meet(weekdays(days()), weeks()), &w).unwrap();
            prop_assert!(met.windows(2).all(|p| p[0] < p[1]));
        }
    }
}
