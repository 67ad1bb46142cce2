//! The 8×8 hexagram name matrix.

use crate::trigram::Trigram;

/// `NAMES[upper][lower]`, both indexed in Earlier-Heaven order.
const NAMES: [[&str; 8]; 8] = [
    // upper 乾
    [
        "乾为天", "天泽履", "天火同人", "天雷无妄", "天风姤", "天水讼", "天山遁", "天地否",
    ],
    // upper 兑
    [
        "泽天夬", "兑为泽", "泽火革", "泽雷随", "泽风大过", "泽水困", "泽山咸", "泽地萃",
    ],
    // upper 离
    [
        "火天大有", "火泽睽", "离为火", "火雷噬嗑", "火风鼎", "火水未济", "火山旅", "火地晋",
    ],
    // upper 震
    [
        "雷天大壮", "雷泽归妹", "雷火丰", "震为雷", "雷风恒", "雷水解", "雷山小过", "雷地豫",
    ],
    // upper 巽
    [
        "风天小畜", "风泽中孚", "风火家人", "风雷益", "巽为风", "风水涣", "风山渐", "风地观",
    ],
    // upper 坎
    [
        "水天需", "水泽节", "水火既济", "水雷屯", "水风井", "坎为水", "水山蹇", "水地比",
    ],
    // upper 艮
    [
        "山天大畜", "山泽损", "山火贲", "山雷颐", "山风蛊", "山水蒙", "艮为山", "山地剥",
    ],
    // upper 坤
    [
        "地天泰", "地泽临", "地火明夷", "地雷复", "地风升", "地水师", "地山谦", "坤为地",
    ],
];

/// Full name of the hexagram with `upper` over `lower`, e.g. `山地剥`.
pub fn hexagram_name(upper: Trigram, lower: Trigram) -> &'static str {
    NAMES[upper as usize][lower as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use Trigram::*;

    #[test]
    fn pure_names_use_wei() {
        for t in Trigram::ALL {
            let name = hexagram_name(t, t);
            assert!(name.starts_with(t.chinese()), "{name}");
            assert!(name.contains('为'), "{name}");
        }
    }

    #[test]
    fn mixed_names_start_with_images() {
        for upper in Trigram::ALL {
            for lower in Trigram::ALL {
                if upper == lower {
                    continue;
                }
                let name = hexagram_name(upper, lower);
                let expected: String = [upper.image(), lower.image()].concat();
                assert!(name.starts_with(&expected), "{name}");
            }
        }
    }

    #[test]
    fn samples() {
        assert_eq!(hexagram_name(Gen, Kun), "山地剥");
        assert_eq!(hexagram_name(Kan, Li), "水火既济");
        assert_eq!(hexagram_name(Kun, Qian), "地天泰");
    }
}
