use super::types::FamilyMember;

fn branch(name: &str, children: &[&str]) -> FamilyMember {
	FamilyMember::with_children(name, children.iter().map(|n| FamilyMember::leaf(n)).collect())
}

/// The family genealogy: one root, twelve first-generation members, and
/// their children. Defined once at startup and never mutated.
pub fn family_data() -> FamilyMember {
	FamilyMember::with_children(
		"Family Root",
		vec![
			branch(
				"Uncle Jumaa",
				&["Hamdan", "Hana", "Hazza", "Hala", "Hajar", "Salem", "Youssef", "Mohammed"],
			),
			branch("Uncle Saeed", &["Yahya", "Salem", "Mariam", "Ahmed"]),
			branch("Uncle Hamad", &["Salem", "Hayat", "Amir"]),
			branch("Aunt Zawina", &["Dana", "Al-Hahd", "Amin"]),
			branch("Uncle Abdullah", &["Al-Walid", "Ahmed", "Amal", "Al-Mahdi"]),
			branch("Uncle Mohammed", &["Salem", "Asa", "Abdulaziz", "Imran", "Tariq"]),
			branch("Uncle Ali", &["Zawina", "Taghreed", "Zahoor", "Salem"]),
			branch("Aunt Aisha", &["Sultan", "Abdullah", "Rashid", "Asma", "Mohammed"]),
			branch(
				"Aunt Nasra",
				&["Lamak", "Jahina", "Salem", "Bathina", "Abdulmalik", "Makkiyah", "Malik", "Mohammed"],
			),
			branch("Aunt Sheikha", &["Saud", "Mira", "Mohammed", "Marwa", "Faisal", "Omar"]),
			branch("Aunt Fatima", &["Bader", "Baraa", "Reem", "Raed", "Hiba", "Thuraya"]),
			branch("Aunt Maytha", &["Nawf", "Hamad", "Noor", "Reem", "Aya", "Mariam"]),
		],
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dataset_shape() {
		let data = family_data();
		assert_eq!(data.name, "Family Root");
		assert_eq!(data.children.len(), 12);
		// Three known depths only.
		for gen1 in &data.children {
			assert!(!gen1.children.is_empty());
			for gen2 in &gen1.children {
				assert!(gen2.children.is_empty());
			}
		}
	}
}
