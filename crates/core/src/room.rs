//! Building catalog and room-string resolution.

use serde::Serialize;

use crate::course::Language;

/// A fixed bilingual label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Label {
	pub chinese: &'static str,
	pub english: &'static str,
}

impl Label {
	#[must_use]
	pub fn get(&self, language: Language) -> &'static str {
		match language {
			Language::Chinese => self.chinese,
			Language::English => self.english,
		}
	}
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RoomDefinition {
	/// Matched against the start of the raw room string.
	pub prefix: &'static str,
	/// Short building code shown in front of the room number.
	pub code: Label,
	pub building: Label,
}

const fn room(
	prefix: &'static str,
	code: (&'static str, &'static str),
	building: (&'static str, &'static str),
) -> RoomDefinition {
	RoomDefinition {
		prefix,
		code: Label {
			chinese: code.0,
			english: code.1,
		},
		building: Label {
			chinese: building.0,
			english: building.1,
		},
	}
}

/// Campus buildings, in lookup order. The first matching prefix wins, so an
/// entry must come before any other entry whose prefix is a prefix of its own.
pub static CATALOG: [RoomDefinition; 32] = [
	room(
		"BMES醫環",
		("醫環", "BMES"),
		("生醫工程及環境科學館", "Biomedical Engineering and Environmental Sciences Building"),
	),
	room(
		"CC計中",
		("計中", "CC"),
		("第二綜合大樓(計通中心)", "General Building II (Computer & Communication Center)"),
	),
	room(
		"CHE化工",
		("化工", "CHE"),
		("化工館", "Chemical Engineering Building"),
	),
	room(
		"CHEM化",
		("化", "CHEM"),
		("化學館", "Chemistry Building"),
	),
	room(
		"CHEM II化二",
		("化二", "CHEM II"),
		("動機化學實驗館(化學二館)", "Chemistry and Power Mechanical Engineering Building"),
	),
	room(
		"Counsel諮商",
		("諮商", "Counsel"),
		("醫輔中心", "Clinic and Counseling Center"),
	),
	room(
		"DELTA台達",
		("台達", "DELTA"),
		("台達館", "Delta Building"),
	),
	room(
		"D-Ren仁齋",
		("仁齋", "D-Ren"),
		("仁齋", "Dormitory Ren"),
	),
	room(
		"D-Shi實齋",
		("實齋", "D-Shi"),
		("實齋", "Dormitory Shi"),
	),
	room(
		"EDU教",
		("教", "EDU"),
		("教育館", "Education Building"),
	),
	room(
		"EECS資電",
		("資電", "EECS"),
		("資訊電機館", "Electrical Engineering and Computer Science Building"),
	),
	room(
		"ENG I工一",
		("工一", "ENG I"),
		("工程一館", "Engineering Building I"),
	),
	room(
		"ESS工科",
		("工科", "ESS"),
		("工科館", "Engineering and System Science Building"),
	),
	room(
		"GEN I綜一",
		("綜一", "GEN I"),
		("第一綜合大樓", "General Building I"),
	),
	room(
		"GEN II綜二",
		("綜二", "GEN II"),
		("第二綜合大樓", "General Building II"),
	),
	room(
		"GEN III綜三",
		("綜三", "GEN III"),
		("第三綜合大樓", "General Building III"),
	),
	room(
		"GEN IV綜四",
		("綜四", "GEN IV"),
		("第四綜合大樓", "General Building IV"),
	),
	room(
		"HSS人社",
		("人社", "HSS"),
		("人文社會學院", "Humanities and Social Sciences Building"),
	),
	room(
		"LS I生一",
		("生一", "LS I"),
		("生命科學一館", "Life Science Building I"),
	),
	room(
		"LS II生二",
		("生二", "LS II"),
		("生命科學二館", "Life Science Building II"),
	),
	room(
		"LTM綠能",
		("綠能", "LTM"),
		("綠能大樓(李存敏館)", "Lee Tsen Min Building"),
	),
	room(
		"MS材料",
		("材料", "MS"),
		("材料科技館", "Materials Science and Technology Building"),
	),
	room(
		"MSLAB材實",
		("材實", "MSLAB"),
		("材料實驗館", "Materials Science Laboratory"),
	),
	room(
		"MXIC旺宏",
		("旺宏", "MXIC"),
		("旺宏館(學習資源中心)", "MXIC Building(Learning Resource Center)"),
	),
	room(
		"NTHU Lab清實",
		("清實", "NTHU Lab"),
		("清華實驗室", "Tsing Hua Laboratory"),
	),
	room(
		"PHYS物",
		("物", "PHYS"),
		("物理館", "Physics Building"),
	),
	room(
		"PHYSLAB普實",
		("普實", "PHYSLAB"),
		("普物實驗館", "Physics Laboratory"),
	),
	room(
		"STC蒙民",
		("蒙民", "STC"),
		("學生活動中心", "Student Union"),
	),
	room(
		"TSMC台積",
		("台積", "TSMC"),
		("台積館", "TSMC Building"),
	),
	room(
		"SINICA中研院",
		("中研院", "SINICA"),
		("北市南港區中研院", "Academia Sinica"),
	),
	room(
		"Nanda南大",
		("南大", "Nanda"),
		("南大校區", "Nanda Campus"),
	),
	room(
		"VC虛擬教室",
		("虛擬教室", "VC"),
		("線上進行課程,無實體教室", "Virtual classroom"),
	),
];

/// A room as printed in the course table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
	pub original: String,
	/// `None` for rooms outside the catalog; they are shown as-is.
	pub building: Option<&'static RoomDefinition>,
	/// The room number with the building prefix removed, or the whole string
	/// when no building matched.
	pub code: String,
}

impl Room {
	/// `"<building code> <room code>"` when resolved, the raw string otherwise.
	#[must_use]
	pub fn label(&self, language: Language) -> String {
		match self.building {
			Some(building) => format!("{} {}", building.code.get(language), self.code),
			None => self.code.clone(),
		}
	}
}

/// Finds the first entry of `catalog` whose prefix starts `raw`, returning it
/// with the remainder of `raw`.
#[must_use]
pub fn lookup<'c, 'r>(
	catalog: &'c [RoomDefinition],
	raw: &'r str,
) -> Option<(&'c RoomDefinition, &'r str)> {
	catalog
		.iter()
		.find_map(|def| raw.strip_prefix(def.prefix).map(|rest| (def, rest)))
}

/// Resolves `raw` against [`CATALOG`]. An unknown building is not an error.
#[must_use]
pub fn resolve(raw: &str) -> Room {
	match lookup(&CATALOG, raw) {
		Some((building, code)) => Room {
			original: raw.to_string(),
			building: Some(building),
			code: code.to_string(),
		},
		None => Room {
			original: raw.to_string(),
			building: None,
			code: raw.to_string(),
		},
	}
}
