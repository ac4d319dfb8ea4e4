/// One-line code snippets for code mode; typed word by word like prose.
pub const CODE_SNIPPETS: &[&str] = &[
    // JavaScript
    "const [state, dispatch] = useReducer(reducer, initialState); const handleClick = () => { dispatch({ type: 'INCREMENT' }); };",
    "function fibonacci(n) { if (n <= 1) return n; return fibonacci(n - 1) + fibonacci(n - 2); }",
    "const fetchData = async () => { try { const response = await fetch(url); const data = await response.json(); return data; } catch (error) { console.error(error); } };",
    "class Rectangle { constructor(width, height) { this.width = width; this.height = height; } getArea() { return this.width * this.height; } }",
    "const numbers = [1, 2, 3, 4, 5]; const doubled = numbers.map(n => n * 2); const sum = numbers.reduce((acc, n) => acc + n, 0);",
    // React
    "import React, { useState, useEffect } from 'react'; const Counter = () => { const [count, setCount] = useState(0); return <div onClick={() => setCount(count + 1)}>{count}</div>; };",
    "useEffect(() => { const timer = setInterval(() => { setTime(new Date()); }, 1000); return () => clearInterval(timer); }, []);",
    "const TodoList = ({ items }) => { return <ul>{items.map(item => <li key={item.id}>{item.text}</li>)}</ul>; };",
    // Python
    "def quick_sort(arr): if len(arr) <= 1: return arr; pivot = arr[len(arr) // 2]; left = [x for x in arr if x < pivot]; middle = [x for x in arr if x == pivot]; right = [x for x in arr if x > pivot]; return quick_sort(left) + middle + quick_sort(right);",
    "class BankAccount: def __init__(self, balance=0): self.balance = balance; def deposit(self, amount): self.balance += amount; def withdraw(self, amount): if amount <= self.balance: self.balance -= amount; return True; return False;",
    // algorithms
    "function binarySearch(arr, target) { let left = 0; let right = arr.length - 1; while (left <= right) { const mid = Math.floor((left + right) / 2); if (arr[mid] === target) return mid; if (arr[mid] < target) left = mid + 1; else right = mid - 1; } return -1; }",
    "const mergeSort = (arr) => { if (arr.length <= 1) return arr; const mid = Math.floor(arr.length / 2); const left = mergeSort(arr.slice(0, mid)); const right = mergeSort(arr.slice(mid)); return merge(left, right); };",
    "const styles = { container: { display: 'flex', justifyContent: 'center', alignItems: 'center', padding: '20px' }, button: { backgroundColor: '#007bff', color: 'white', border: 'none', borderRadius: '4px' } };",
    // async
    "async function getUserData(userId) { const response = await fetch(`/api/users/${userId}`); if (!response.ok) throw new Error('User not found'); const user = await response.json(); return user; }",
    "Promise.all([fetchUsers(), fetchPosts(), fetchComments()]).then(([users, posts, comments]) => { console.log('All data loaded'); }).catch(error => { console.error('Error loading data:', error); });",
    "class LinkedList { constructor() { this.head = null; this.size = 0; } add(value) { const node = { value, next: null }; if (!this.head) { this.head = node; } else { let current = this.head; while (current.next) { current = current.next; } current.next = node; } this.size++; } }",
    "const debounce = (func, delay) => { let timeoutId; return (...args) => { clearTimeout(timeoutId); timeoutId = setTimeout(() => func(...args), delay); }; };",
    "const throttle = (func, limit) => { let inThrottle; return function() { const args = arguments; const context = this; if (!inThrottle) { func.apply(context, args); inThrottle = true; setTimeout(() => inThrottle = false, limit); } }; };",
    "const { name, age, ...rest } = user; const newUser = { ...user, email: 'new@email.com' }; const array = [1, 2, 3]; const [first, second, ...others] = array;",
    "const pipe = (...fns) => (x) => fns.reduce((v, f) => f(v), x); const compose = (...fns) => (x) => fns.reduceRight((v, f) => f(v), x);",
    // Rust
    "fn main() { let words: Vec<&str> = text.split_whitespace().collect(); println!(\"{} words\", words.len()); }",
    "impl Iterator for Counter { type Item = u32; fn next(&mut self) -> Option<u32> { self.count += 1; (self.count < 6).then_some(self.count) } }",
    "let total: u64 = orders.iter().filter(|o| o.paid).map(|o| o.amount).sum();",
    "match stream.read(&mut buf) { Ok(0) => break, Ok(n) => out.extend_from_slice(&buf[..n]), Err(e) => return Err(e.into()), }",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippets_are_single_line() {
        assert_eq!(CODE_SNIPPETS.len(), 24);
        for snippet in CODE_SNIPPETS {
            assert!(!snippet.contains('\n'));
            assert!(!snippet.contains("  "), "double space in {snippet}");
            assert_eq!(snippet.trim(), *snippet);
            assert!(snippet.split(' ').count() > 3);
        }
    }

    #[test]
    fn test_every_language_family_is_represented() {
        for marker in ["useState", "def quick_sort", "mergeSort", "LinkedList", "throttle", "impl Iterator"] {
            assert!(
                CODE_SNIPPETS.iter().any(|s| s.contains(marker)),
                "no snippet mentions {marker}"
            );
        }
    }
}
