//! Exact sign of a 2×2 determinant of doubles.
//!
//! Implements the iterated-remainder algorithm of Avnaim, Boissonnat,
//! Devillers, Preparata and Yvinec ("Evaluating signs of determinants using
//! single-precision arithmetic", Algorithmica 17, 1997). The entries are
//! repeatedly reduced by subtracting a floored multiple of the smaller
//! column from the larger; every operation is exact in IEEE-754 doubles, so
//! the sign that finally falls out is the true sign.

/// Returns the sign of the determinant
///
/// ```text
/// | x1  y1 |
/// | x2  y2 |
/// ```
///
/// as `-1`, `0`, or `+1`, computed without overflow, underflow, or rounding
/// affecting the result.
pub fn sign_of_det2x2(x1: f64, y1: f64, x2: f64, y2: f64) -> i32 {
    let (mut x1, mut y1, mut x2, mut y2) = (x1, y1, x2, y2);
    let mut sign = 1;

    // null main-diagonal entries
    if x1 == 0.0 || y2 == 0.0 {
        if y1 == 0.0 || x2 == 0.0 {
            return 0;
        } else if y1 > 0.0 {
            return if x2 > 0.0 { -sign } else { sign };
        } else {
            return if x2 > 0.0 { sign } else { -sign };
        }
    }

    // null anti-diagonal entries
    if y1 == 0.0 || x2 == 0.0 {
        if y2 > 0.0 {
            return if x1 > 0.0 { sign } else { -sign };
        } else {
            return if x1 > 0.0 { -sign } else { sign };
        }
    }

    // make both y entries positive, permuting so that y2 is the larger
    if 0.0 < y1 {
        if 0.0 < y2 {
            if y1 > y2 {
                sign = -sign;
                std::mem::swap(&mut x1, &mut x2);
                std::mem::swap(&mut y1, &mut y2);
            }
        } else if y1 <= -y2 {
            sign = -sign;
            x2 = -x2;
            y2 = -y2;
        } else {
            let swap = x1;
            x1 = -x2;
            x2 = swap;
            let swap = y1;
            y1 = -y2;
            y2 = swap;
        }
    } else if 0.0 < y2 {
        if -y1 <= y2 {
            sign = -sign;
            x1 = -x1;
            y1 = -y1;
        } else {
            let swap = -x1;
            x1 = x2;
            x2 = swap;
            let swap = -y1;
            y1 = y2;
            y2 = swap;
        }
    } else if y1 >= y2 {
        x1 = -x1;
        y1 = -y1;
        x2 = -x2;
        y2 = -y2;
    } else {
        sign = -sign;
        let swap = -x1;
        x1 = -x2;
        x2 = swap;
        let swap = -y1;
        y1 = -y2;
        y2 = swap;
    }

    // make both x entries positive; when |x2| < |x1| the sign is already
    // decided
    if 0.0 < x1 {
        if 0.0 < x2 {
            if x1 > x2 {
                return sign;
            }
        } else {
            return sign;
        }
    } else if 0.0 < x2 {
        return -sign;
    } else if x1 >= x2 {
        sign = -sign;
        x1 = -x1;
        x2 = -x2;
    } else {
        return -sign;
    }

    // all entries strictly positive, x1 <= x2 and y1 <= y2
    loop {
        let k = (x2 / x1).floor();
        x2 -= k * x1;
        y2 -= k * y1;

        if y2 < 0.0 {
            return -sign;
        }
        if y2 > y1 {
            return sign;
        }

        // inclusion test: compare the residual column against half of the
        // reference column. In the ambiguous quadrant the residual column is
        // doubled and re-centred, which doubles the determinant; both
        // subtractions are exact by Sterbenz's lemma.
        if x1 > x2 + x2 {
            if y1 < y2 + y2 {
                return sign;
            }
        } else if y1 > y2 + y2 {
            return -sign;
        } else {
            x2 = x2 + x2 - x1;
            y2 = y2 + y2 - y1;
        }

        if y2 == 0.0 {
            return if x2 == 0.0 { 0 } else { -sign };
        }
        if x2 == 0.0 {
            return sign;
        }

        // exchange the column roles, negating the sign
        if x2 < x1 {
            sign = -sign;
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }
    }
}
